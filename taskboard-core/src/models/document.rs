use serde::{Deserialize, Serialize};

use super::{Project, Task};

/// The whole persisted state. Both collections are required keys on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
}
