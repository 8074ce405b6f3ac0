//! Domain types for the issue tracker
//!
//! Developers, stories and bugs, plus the enums that describe their
//! workflow. All records are plain data; persistence lives in [`crate::store`].

mod developer;
mod issue;
mod priority;
mod status;

pub use developer::{Developer, DeveloperId};
pub use issue::{Bug, BugUpdate, IssueId, IssueType, NewBug, NewStory, Story, StoryUpdate};
pub use priority::Priority;
pub use status::{BugStatus, StoryStatus};
