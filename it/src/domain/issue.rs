//! Issue records: stories and bugs
//!
//! Both kinds share one table in the store, discriminated by [`IssueType`].
//! Only stories carry points and take part in planning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::developer::Developer;
use super::priority::Priority;
use super::status::{BugStatus, StoryStatus};
use crate::planning::Estimated;

/// Identifier assigned by the store on insert
pub type IssueId = i64;

/// Discriminator for the two issue kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueType {
    Story,
    Bug,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Story => write!(f, "STORY"),
            Self::Bug => write!(f, "BUG"),
        }
    }
}

impl std::str::FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "story" => Ok(Self::Story),
            "bug" => Ok(Self::Bug),
            _ => Err(format!("Unknown issue type: {}", s)),
        }
    }
}

/// A unit of feature work with a point estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: IssueId,
    pub title: String,
    pub description: Option<String>,
    pub story_point: u32,
    pub status: StoryStatus,
    pub creation_date: DateTime<Utc>,
    pub developer: Option<Developer>,
}

impl Story {
    pub fn issue_type(&self) -> IssueType {
        IssueType::Story
    }
}

impl Estimated for Story {
    fn points(&self) -> u32 {
        self.story_point
    }
}

/// A defect report; never planned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bug {
    pub id: IssueId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: BugStatus,
    pub creation_date: DateTime<Utc>,
    pub developer: Option<Developer>,
}

impl Bug {
    pub fn issue_type(&self) -> IssueType {
        IssueType::Bug
    }
}

/// Fields accepted when creating a story
#[derive(Debug, Clone)]
pub struct NewStory {
    pub title: String,
    pub description: Option<String>,
    pub story_point: u32,
}

/// Full replacement of a story's editable fields
#[derive(Debug, Clone)]
pub struct StoryUpdate {
    pub title: String,
    pub description: Option<String>,
    pub story_point: u32,
    pub status: StoryStatus,
}

/// Fields accepted when creating a bug
#[derive(Debug, Clone)]
pub struct NewBug {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
}

/// Full replacement of a bug's editable fields
#[derive(Debug, Clone)]
pub struct BugUpdate {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: BugStatus,
}
