//! Developer record

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store on insert
pub type DeveloperId = i64;

/// A team member that issues can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    pub id: DeveloperId,
    pub name: String,
}

impl Developer {
    pub fn new(id: DeveloperId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

impl std::fmt::Display for Developer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}
