mod document;
mod project;
mod task;
pub mod timestamp;

pub use document::*;
pub use project::*;
pub use task::*;

use chrono::{DateTime, SubsecRound, Utc};

/// Integer identifier shared by projects and tasks.
pub type Id = u64;

/// Creation timestamp, truncated to milliseconds so it serializes as
/// `2024-05-01T09:30:00.123Z`.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// True when a required text field is absent or blank.
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}
