//! Workflow statuses for stories and bugs

use serde::{Deserialize, Serialize};

/// Story status in the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum StoryStatus {
    /// Created, not yet estimated
    #[default]
    New,
    /// Points agreed by the team
    Estimated,
    /// Done; never planned again
    Completed,
}

impl StoryStatus {
    /// Statuses eligible for the weekly plan
    pub const OUTSTANDING: [StoryStatus; 2] = [StoryStatus::New, StoryStatus::Estimated];

    /// Check if the story still needs work
    pub fn is_outstanding(&self) -> bool {
        Self::OUTSTANDING.contains(self)
    }
}

impl std::fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::Estimated => write!(f, "ESTIMATED"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl std::str::FromStr for StoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "estimated" => Ok(Self::Estimated),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Unknown story status: {}", s)),
        }
    }
}

/// Bug status in the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum BugStatus {
    #[default]
    New,
    Verified,
    Resolved,
}

impl std::fmt::Display for BugStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::Verified => write!(f, "VERIFIED"),
            Self::Resolved => write!(f, "RESOLVED"),
        }
    }
}

impl std::str::FromStr for BugStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "verified" => Ok(Self::Verified),
            "resolved" => Ok(Self::Resolved),
            _ => Err(format!("Unknown bug status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_status_parse_ignores_case() {
        assert_eq!("new".parse::<StoryStatus>().unwrap(), StoryStatus::New);
        assert_eq!("Estimated".parse::<StoryStatus>().unwrap(), StoryStatus::Estimated);
        assert_eq!("COMPLETED".parse::<StoryStatus>().unwrap(), StoryStatus::Completed);
        assert!("done".parse::<StoryStatus>().is_err());
    }

    #[test]
    fn test_story_status_outstanding() {
        assert!(StoryStatus::New.is_outstanding());
        assert!(StoryStatus::Estimated.is_outstanding());
        assert!(!StoryStatus::Completed.is_outstanding());
    }

    #[test]
    fn test_bug_status_parse_ignores_case() {
        assert_eq!("verified".parse::<BugStatus>().unwrap(), BugStatus::Verified);
        assert_eq!("RESOLVED".parse::<BugStatus>().unwrap(), BugStatus::Resolved);
        assert!("closed".parse::<BugStatus>().is_err());
    }

    #[test]
    fn test_status_display_matches_serde() {
        for status in [StoryStatus::New, StoryStatus::Estimated, StoryStatus::Completed] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
        for status in [BugStatus::New, BugStatus::Verified, BugStatus::Resolved] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }
}
