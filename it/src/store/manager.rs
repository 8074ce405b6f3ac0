//! StoreManager - actor that owns the Store
//!
//! Processes commands via channels for thread-safe access to persistent
//! state. Every request is answered on its own oneshot channel, so a single
//! call always sees one consistent snapshot.

use std::path::Path;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use super::db::Store;
use super::messages::{StoreCommand, StoreError, StoreResponse};
use crate::domain::{
    Bug, BugUpdate, Developer, DeveloperId, IssueId, NewBug, NewStory, Story, StoryStatus, StoryUpdate,
};
use crate::planning::PlanSource;

/// Handle to send commands to the StoreManager
#[derive(Clone)]
pub struct StoreManager {
    tx: mpsc::Sender<StoreCommand>,
}

impl StoreManager {
    /// Open the database at `db_path` and spawn the actor
    pub fn spawn(db_path: impl AsRef<Path>) -> eyre::Result<Self> {
        debug!(db_path = %db_path.as_ref().display(), "spawn: called");
        let store = Store::open(db_path.as_ref())?;
        Ok(Self::with_store(store))
    }

    /// Spawn the actor around an already opened store
    pub fn with_store(store: Store) -> Self {
        let (tx, rx) = mpsc::channel(256);
        tokio::spawn(actor_loop(store, rx));
        info!("StoreManager spawned");
        Self { tx }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<StoreResponse<T>>) -> StoreCommand,
    ) -> StoreResponse<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(command(reply_tx))
            .await
            .map_err(|_| StoreError::ChannelError)?;
        reply_rx.await.map_err(|_| StoreError::ChannelError)?
    }

    // === Developer operations ===

    pub async fn create_developer(&self, name: impl Into<String>) -> StoreResponse<Developer> {
        let name = name.into();
        debug!(%name, "create_developer: called");
        self.request(|reply| StoreCommand::CreateDeveloper { name, reply }).await
    }

    pub async fn get_developer(&self, id: DeveloperId) -> StoreResponse<Developer> {
        debug!(id, "get_developer: called");
        self.request(|reply| StoreCommand::GetDeveloper { id, reply }).await
    }

    pub async fn update_developer(&self, id: DeveloperId, name: impl Into<String>) -> StoreResponse<Developer> {
        let name = name.into();
        debug!(id, %name, "update_developer: called");
        self.request(|reply| StoreCommand::UpdateDeveloper { id, name, reply })
            .await
    }

    pub async fn delete_developer(&self, id: DeveloperId) -> StoreResponse<()> {
        debug!(id, "delete_developer: called");
        self.request(|reply| StoreCommand::DeleteDeveloper { id, reply }).await
    }

    pub async fn list_developers(&self) -> StoreResponse<Vec<Developer>> {
        debug!("list_developers: called");
        self.request(|reply| StoreCommand::ListDevelopers { reply }).await
    }

    pub async fn count_developers(&self) -> StoreResponse<u64> {
        debug!("count_developers: called");
        self.request(|reply| StoreCommand::CountDevelopers { reply }).await
    }

    // === Story operations ===

    pub async fn create_story(&self, story: NewStory) -> StoreResponse<Story> {
        debug!(title = %story.title, points = story.story_point, "create_story: called");
        self.request(|reply| StoreCommand::CreateStory { story, reply }).await
    }

    pub async fn get_story(&self, id: IssueId) -> StoreResponse<Story> {
        debug!(id, "get_story: called");
        self.request(|reply| StoreCommand::GetStory { id, reply }).await
    }

    pub async fn update_story(&self, id: IssueId, update: StoryUpdate) -> StoreResponse<Story> {
        debug!(id, status = %update.status, "update_story: called");
        self.request(|reply| StoreCommand::UpdateStory { id, update, reply })
            .await
    }

    pub async fn delete_story(&self, id: IssueId) -> StoreResponse<()> {
        debug!(id, "delete_story: called");
        self.request(|reply| StoreCommand::DeleteStory { id, reply }).await
    }

    /// Stories with one of `statuses` in insertion order; all if empty
    pub async fn list_stories(&self, statuses: Vec<StoryStatus>) -> StoreResponse<Vec<Story>> {
        debug!(?statuses, "list_stories: called");
        self.request(|reply| StoreCommand::ListStories { statuses, reply })
            .await
    }

    pub async fn assign_story(&self, id: IssueId, developer_id: DeveloperId) -> StoreResponse<()> {
        debug!(id, developer_id, "assign_story: called");
        self.request(|reply| StoreCommand::AssignStory {
            id,
            developer_id,
            reply,
        })
        .await
    }

    // === Bug operations ===

    pub async fn create_bug(&self, bug: NewBug) -> StoreResponse<Bug> {
        debug!(title = %bug.title, priority = %bug.priority, "create_bug: called");
        self.request(|reply| StoreCommand::CreateBug { bug, reply }).await
    }

    pub async fn get_bug(&self, id: IssueId) -> StoreResponse<Bug> {
        debug!(id, "get_bug: called");
        self.request(|reply| StoreCommand::GetBug { id, reply }).await
    }

    pub async fn update_bug(&self, id: IssueId, update: BugUpdate) -> StoreResponse<Bug> {
        debug!(id, status = %update.status, "update_bug: called");
        self.request(|reply| StoreCommand::UpdateBug { id, update, reply })
            .await
    }

    pub async fn delete_bug(&self, id: IssueId) -> StoreResponse<()> {
        debug!(id, "delete_bug: called");
        self.request(|reply| StoreCommand::DeleteBug { id, reply }).await
    }

    pub async fn assign_bug(&self, id: IssueId, developer_id: DeveloperId) -> StoreResponse<()> {
        debug!(id, developer_id, "assign_bug: called");
        self.request(|reply| StoreCommand::AssignBug {
            id,
            developer_id,
            reply,
        })
        .await
    }

    /// Stop the actor; later requests fail with a channel error
    pub async fn shutdown(&self) -> StoreResponse<()> {
        debug!("shutdown: called");
        self.tx
            .send(StoreCommand::Shutdown)
            .await
            .map_err(|_| StoreError::ChannelError)
    }
}

#[async_trait]
impl PlanSource for StoreManager {
    async fn developer_count(&self) -> StoreResponse<u64> {
        self.count_developers().await
    }

    async fn backlog(&self) -> StoreResponse<Vec<Story>> {
        self.list_stories(StoryStatus::OUTSTANDING.to_vec()).await
    }
}

async fn actor_loop(store: Store, mut rx: mpsc::Receiver<StoreCommand>) {
    debug!("StoreManager actor started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            StoreCommand::CreateDeveloper { name, reply } => {
                let _ = reply.send(store.create_developer(&name));
            }
            StoreCommand::GetDeveloper { id, reply } => {
                let _ = reply.send(store.get_developer(id));
            }
            StoreCommand::UpdateDeveloper { id, name, reply } => {
                let _ = reply.send(store.update_developer(id, &name));
            }
            StoreCommand::DeleteDeveloper { id, reply } => {
                let _ = reply.send(store.delete_developer(id));
            }
            StoreCommand::ListDevelopers { reply } => {
                let _ = reply.send(store.list_developers());
            }
            StoreCommand::CountDevelopers { reply } => {
                let _ = reply.send(store.count_developers());
            }

            StoreCommand::CreateStory { story, reply } => {
                let _ = reply.send(store.create_story(&story));
            }
            StoreCommand::GetStory { id, reply } => {
                let _ = reply.send(store.get_story(id));
            }
            StoreCommand::UpdateStory { id, update, reply } => {
                let _ = reply.send(store.update_story(id, &update));
            }
            StoreCommand::DeleteStory { id, reply } => {
                let _ = reply.send(store.delete_story(id));
            }
            StoreCommand::ListStories { statuses, reply } => {
                let _ = reply.send(store.list_stories(&statuses));
            }
            StoreCommand::AssignStory {
                id,
                developer_id,
                reply,
            } => {
                let _ = reply.send(store.assign_story(id, developer_id));
            }

            StoreCommand::CreateBug { bug, reply } => {
                let _ = reply.send(store.create_bug(&bug));
            }
            StoreCommand::GetBug { id, reply } => {
                let _ = reply.send(store.get_bug(id));
            }
            StoreCommand::UpdateBug { id, update, reply } => {
                let _ = reply.send(store.update_bug(id, &update));
            }
            StoreCommand::DeleteBug { id, reply } => {
                let _ = reply.send(store.delete_bug(id));
            }
            StoreCommand::AssignBug {
                id,
                developer_id,
                reply,
            } => {
                let _ = reply.send(store.assign_bug(id, developer_id));
            }

            StoreCommand::Shutdown => {
                info!("StoreManager shutting down");
                break;
            }
        }
    }

    debug!("StoreManager actor stopped");
}
