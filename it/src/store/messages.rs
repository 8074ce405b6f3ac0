//! Store manager messages
//!
//! Commands and responses for the actor pattern.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::{
    Bug, BugUpdate, Developer, DeveloperId, IssueId, NewBug, NewStory, Story, StoryStatus, StoryUpdate,
};

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Developer not found: {0}")]
    DeveloperNotFound(DeveloperId),

    #[error("Story not found: {0}")]
    StoryNotFound(IssueId),

    #[error("Bug not found: {0}")]
    BugNotFound(IssueId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Channel error")]
    ChannelError,
}

impl StoreError {
    /// Errors caused by the caller's input rather than the store itself
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::DeveloperNotFound(_) | Self::StoryNotFound(_) | Self::BugNotFound(_) | Self::InvalidInput(_)
        )
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

/// Response from store operations
pub type StoreResponse<T> = Result<T, StoreError>;

type Reply<T> = oneshot::Sender<StoreResponse<T>>;

/// Commands sent to the StoreManager actor
#[derive(Debug)]
pub enum StoreCommand {
    // Developer operations
    CreateDeveloper {
        name: String,
        reply: Reply<Developer>,
    },
    GetDeveloper {
        id: DeveloperId,
        reply: Reply<Developer>,
    },
    UpdateDeveloper {
        id: DeveloperId,
        name: String,
        reply: Reply<Developer>,
    },
    DeleteDeveloper {
        id: DeveloperId,
        reply: Reply<()>,
    },
    ListDevelopers {
        reply: Reply<Vec<Developer>>,
    },
    CountDevelopers {
        reply: Reply<u64>,
    },

    // Story operations
    CreateStory {
        story: NewStory,
        reply: Reply<Story>,
    },
    GetStory {
        id: IssueId,
        reply: Reply<Story>,
    },
    UpdateStory {
        id: IssueId,
        update: StoryUpdate,
        reply: Reply<Story>,
    },
    DeleteStory {
        id: IssueId,
        reply: Reply<()>,
    },
    ListStories {
        statuses: Vec<StoryStatus>,
        reply: Reply<Vec<Story>>,
    },
    AssignStory {
        id: IssueId,
        developer_id: DeveloperId,
        reply: Reply<()>,
    },

    // Bug operations
    CreateBug {
        bug: NewBug,
        reply: Reply<Bug>,
    },
    GetBug {
        id: IssueId,
        reply: Reply<Bug>,
    },
    UpdateBug {
        id: IssueId,
        update: BugUpdate,
        reply: Reply<Bug>,
    },
    DeleteBug {
        id: IssueId,
        reply: Reply<()>,
    },
    AssignBug {
        id: IssueId,
        developer_id: DeveloperId,
        reply: Reply<()>,
    },

    // Shutdown
    Shutdown,
}
