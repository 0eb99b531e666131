use crate::error::{Result, StoreError};
use crate::models::{Id, Project, Task};

pub trait Identified {
    fn id(&self) -> Id;
}

impl Identified for Project {
    fn id(&self) -> Id {
        self.id
    }
}

impl Identified for Task {
    fn id(&self) -> Id {
        self.id
    }
}

/// Next id for a collection: one past the current maximum, 1 when empty.
pub fn next_id<T: Identified>(items: &[T]) -> Result<Id> {
    match items.iter().map(Identified::id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| StoreError::validation("ID space exhausted")),
    }
}
