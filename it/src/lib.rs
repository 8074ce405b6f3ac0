//! Issue tracker with capacity-bounded weekly planning
//!
//! Developers, stories and bugs are kept in SQLite. The planner splits the
//! outstanding stories into consecutive weeks, each holding at most what the
//! team can deliver in a week.
//!
//! # Architecture
//!
//! ```text
//! it (CLI) ──► PlanService ──► PlanSource
//!     │                           ▲
//!     └──────► StoreManager ──────┘   (actor, mpsc + oneshot)
//!                   │
//!                   ▼
//!                 Store (rusqlite)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use issuetracker::{PlanService, StoreManager};
//!
//! let manager = StoreManager::spawn("issues.db")?;
//! let service = PlanService::new(manager, 10, "%Y-%m-%d");
//! let plan = service.get_plan().await?;
//! println!("{}", plan.render_text());
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod planning;
pub mod store;

pub use config::Config;
pub use domain::{Bug, BugStatus, Developer, IssueType, Priority, Story, StoryStatus};
pub use planning::{Plan, PlanListResponse, PlanService, PlanSource, WeeklyBatch, build_plan, compute_capacity};
pub use store::{Store, StoreError, StoreManager};
