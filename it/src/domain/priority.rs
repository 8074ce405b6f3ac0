//! Bug priority levels

use serde::{Deserialize, Serialize};

/// Priority of a bug, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Critical,
    Major,
    Minor,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::Major => write!(f, "MAJOR"),
            Self::Minor => write!(f, "MINOR"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical < Priority::Major);
        assert!(Priority::Major < Priority::Minor);
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::Critical.to_string(), "CRITICAL");
        assert_eq!(Priority::Major.to_string(), "MAJOR");
        assert_eq!(Priority::Minor.to_string(), "MINOR");
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("minor".parse::<Priority>().unwrap(), Priority::Minor);
        assert_eq!("MAJOR".parse::<Priority>().unwrap(), Priority::Major);
        assert_eq!("Critical".parse::<Priority>().unwrap(), Priority::Critical);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_serde() {
        let json = serde_json::to_string(&Priority::Major).unwrap();
        assert_eq!(json, "\"MAJOR\"");

        let priority: Priority = serde_json::from_str("\"CRITICAL\"").unwrap();
        assert_eq!(priority, Priority::Critical);
    }
}
