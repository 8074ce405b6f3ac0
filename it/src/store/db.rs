//! SQLite persistence for developers and issues
//!
//! Stories and bugs share the `issue` table, told apart by its `type`
//! column. Ids come from SQLite, so ascending id is insertion order and
//! therefore backlog order.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use eyre::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use tracing::{debug, info};

use super::messages::{StoreError, StoreResponse};
use crate::domain::{
    Bug, BugStatus, BugUpdate, Developer, DeveloperId, IssueId, IssueType, NewBug, NewStory, Story, StoryStatus,
    StoryUpdate,
};

const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS developer (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS issue (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    type TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    creation_date INTEGER NOT NULL,
    developer_id INTEGER REFERENCES developer(id) ON DELETE SET NULL,
    status TEXT NOT NULL,
    priority TEXT,
    story_point INTEGER
);

CREATE INDEX IF NOT EXISTS idx_issue_type_status ON issue(type, status);
"#;

const STORY_COLUMNS: &str = "i.id, i.title, i.description, i.story_point, i.status, i.creation_date, d.id, d.name";

const BUG_COLUMNS: &str = "i.id, i.title, i.description, i.priority, i.status, i.creation_date, d.id, d.name";

/// Synchronous store; owned by the StoreManager actor
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a store at the given database path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context("Failed to create store directory")?;
        }
        let conn = Connection::open(path).context(format!("Failed to open database: {}", path.display()))?;
        let store = Self::init(conn)?;
        info!(path = %path.display(), "Opened store");
        Ok(store)
    }

    /// Store that lives only as long as the process
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA).context("Failed to initialise schema")?;
        Ok(Self { conn })
    }

    // === Developers ===

    pub fn create_developer(&self, name: &str) -> StoreResponse<Developer> {
        let name = require_text("name", name)?;
        self.conn
            .execute("INSERT INTO developer (name) VALUES (?1)", params![name])?;
        let id = self.conn.last_insert_rowid();
        info!(id, "Developer created");
        Ok(Developer::new(id, name))
    }

    pub fn get_developer(&self, id: DeveloperId) -> StoreResponse<Developer> {
        debug!(id, "get_developer: called");
        self.conn
            .query_row(
                "SELECT id, name FROM developer WHERE id = ?1",
                params![id],
                |row| Ok(Developer::new(row.get(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?
            .ok_or(StoreError::DeveloperNotFound(id))
    }

    pub fn update_developer(&self, id: DeveloperId, name: &str) -> StoreResponse<Developer> {
        let name = require_text("name", name)?;
        let changed = self
            .conn
            .execute("UPDATE developer SET name = ?1 WHERE id = ?2", params![name, id])?;
        if changed == 0 {
            return Err(StoreError::DeveloperNotFound(id));
        }
        info!(id, "Developer updated");
        Ok(Developer::new(id, name))
    }

    /// Delete a developer; their issues become unassigned
    pub fn delete_developer(&self, id: DeveloperId) -> StoreResponse<()> {
        let changed = self.conn.execute("DELETE FROM developer WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::DeveloperNotFound(id));
        }
        info!(id, "Developer deleted");
        Ok(())
    }

    pub fn list_developers(&self) -> StoreResponse<Vec<Developer>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM developer ORDER BY id")?;
        let developers = stmt
            .query_map([], |row| Ok(Developer::new(row.get(0)?, row.get::<_, String>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = developers.len(), "list_developers: fetched");
        Ok(developers)
    }

    pub fn count_developers(&self) -> StoreResponse<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM developer", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    // === Stories ===

    /// Insert a story with status NEW
    pub fn create_story(&self, story: &NewStory) -> StoreResponse<Story> {
        let title = require_text("title", &story.title)?;
        require_points(story.story_point)?;
        self.conn.execute(
            "INSERT INTO issue (type, title, description, creation_date, status, story_point)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                IssueType::Story.to_string(),
                title,
                story.description,
                Utc::now().timestamp_millis(),
                StoryStatus::New.to_string(),
                story.story_point,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, "Story created");
        self.get_story(id)
    }

    pub fn get_story(&self, id: IssueId) -> StoreResponse<Story> {
        debug!(id, "get_story: called");
        let sql = format!(
            "SELECT {STORY_COLUMNS} FROM issue i LEFT JOIN developer d ON d.id = i.developer_id
             WHERE i.id = ?1 AND i.type = ?2"
        );
        self.conn
            .query_row(&sql, params![id, IssueType::Story.to_string()], story_from_row)
            .optional()?
            .ok_or(StoreError::StoryNotFound(id))
    }

    pub fn update_story(&self, id: IssueId, update: &StoryUpdate) -> StoreResponse<Story> {
        let title = require_text("title", &update.title)?;
        require_points(update.story_point)?;
        let changed = self.conn.execute(
            "UPDATE issue SET title = ?1, description = ?2, story_point = ?3, status = ?4
             WHERE id = ?5 AND type = ?6",
            params![
                title,
                update.description,
                update.story_point,
                update.status.to_string(),
                id,
                IssueType::Story.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::StoryNotFound(id));
        }
        info!(id, status = %update.status, "Story updated");
        self.get_story(id)
    }

    pub fn delete_story(&self, id: IssueId) -> StoreResponse<()> {
        if !self.delete_issue(id, IssueType::Story)? {
            return Err(StoreError::StoryNotFound(id));
        }
        info!(id, "Story deleted");
        Ok(())
    }

    /// Stories with one of `statuses`, oldest first; all stories if empty
    pub fn list_stories(&self, statuses: &[StoryStatus]) -> StoreResponse<Vec<Story>> {
        let mut sql = format!(
            "SELECT {STORY_COLUMNS} FROM issue i LEFT JOIN developer d ON d.id = i.developer_id
             WHERE i.type = ?1"
        );
        if !statuses.is_empty() {
            let placeholders: Vec<String> = (0..statuses.len()).map(|n| format!("?{}", n + 2)).collect();
            sql.push_str(&format!(" AND i.status IN ({})", placeholders.join(", ")));
        }
        sql.push_str(" ORDER BY i.id");

        let values: Vec<String> = std::iter::once(IssueType::Story.to_string())
            .chain(statuses.iter().map(|s| s.to_string()))
            .collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let stories = stmt
            .query_map(params_from_iter(values.iter()), story_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = stories.len(), ?statuses, "list_stories: fetched");
        Ok(stories)
    }

    pub fn assign_story(&self, id: IssueId, developer_id: DeveloperId) -> StoreResponse<()> {
        self.get_story(id)?;
        self.get_developer(developer_id)?;
        self.assign_issue(id, developer_id)?;
        info!(id, developer_id, "Developer assigned to story");
        Ok(())
    }

    // === Bugs ===

    /// Insert a bug with status NEW
    pub fn create_bug(&self, bug: &NewBug) -> StoreResponse<Bug> {
        let title = require_text("title", &bug.title)?;
        self.conn.execute(
            "INSERT INTO issue (type, title, description, creation_date, status, priority)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                IssueType::Bug.to_string(),
                title,
                bug.description,
                Utc::now().timestamp_millis(),
                BugStatus::New.to_string(),
                bug.priority.to_string(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, "Bug created");
        self.get_bug(id)
    }

    pub fn get_bug(&self, id: IssueId) -> StoreResponse<Bug> {
        debug!(id, "get_bug: called");
        let sql = format!(
            "SELECT {BUG_COLUMNS} FROM issue i LEFT JOIN developer d ON d.id = i.developer_id
             WHERE i.id = ?1 AND i.type = ?2"
        );
        self.conn
            .query_row(&sql, params![id, IssueType::Bug.to_string()], bug_from_row)
            .optional()?
            .ok_or(StoreError::BugNotFound(id))
    }

    pub fn update_bug(&self, id: IssueId, update: &BugUpdate) -> StoreResponse<Bug> {
        let title = require_text("title", &update.title)?;
        let changed = self.conn.execute(
            "UPDATE issue SET title = ?1, description = ?2, priority = ?3, status = ?4
             WHERE id = ?5 AND type = ?6",
            params![
                title,
                update.description,
                update.priority.to_string(),
                update.status.to_string(),
                id,
                IssueType::Bug.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::BugNotFound(id));
        }
        info!(id, status = %update.status, "Bug updated");
        self.get_bug(id)
    }

    pub fn delete_bug(&self, id: IssueId) -> StoreResponse<()> {
        if !self.delete_issue(id, IssueType::Bug)? {
            return Err(StoreError::BugNotFound(id));
        }
        info!(id, "Bug deleted");
        Ok(())
    }

    pub fn assign_bug(&self, id: IssueId, developer_id: DeveloperId) -> StoreResponse<()> {
        self.get_bug(id)?;
        self.get_developer(developer_id)?;
        self.assign_issue(id, developer_id)?;
        info!(id, developer_id, "Developer assigned to bug");
        Ok(())
    }

    // === Shared ===

    /// Returns whether a row was deleted
    fn delete_issue(&self, id: IssueId, issue_type: IssueType) -> StoreResponse<bool> {
        let changed = self.conn.execute(
            "DELETE FROM issue WHERE id = ?1 AND type = ?2",
            params![id, issue_type.to_string()],
        )?;
        Ok(changed > 0)
    }

    fn assign_issue(&self, id: IssueId, developer_id: DeveloperId) -> StoreResponse<()> {
        self.conn.execute(
            "UPDATE issue SET developer_id = ?1 WHERE id = ?2",
            params![developer_id, id],
        )?;
        Ok(())
    }
}

fn require_text<'a>(field: &str, value: &'a str) -> StoreResponse<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput(format!("{} must not be blank", field)));
    }
    Ok(trimmed)
}

fn require_points(points: u32) -> StoreResponse<()> {
    if points == 0 {
        return Err(StoreError::InvalidInput("story points must be positive".to_string()));
    }
    Ok(())
}

fn parse_column<T: FromStr<Err = String>>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp out of range: {}", millis).into(),
        )
    })
}

fn developer_columns(row: &Row<'_>, id_idx: usize) -> rusqlite::Result<Option<Developer>> {
    let id: Option<DeveloperId> = row.get(id_idx)?;
    let name: Option<String> = row.get(id_idx + 1)?;
    Ok(id.zip(name).map(|(id, name)| Developer::new(id, name)))
}

fn story_from_row(row: &Row<'_>) -> rusqlite::Result<Story> {
    Ok(Story {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        story_point: row.get(3)?,
        status: parse_column(row, 4)?,
        creation_date: timestamp_column(row, 5)?,
        developer: developer_columns(row, 6)?,
    })
}

fn bug_from_row(row: &Row<'_>) -> rusqlite::Result<Bug> {
    Ok(Bug {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority: parse_column(row, 3)?,
        status: parse_column(row, 4)?,
        creation_date: timestamp_column(row, 5)?,
        developer: developer_columns(row, 6)?,
    })
}
