//! Weekly planning
//!
//! Capacity comes from headcount times the configured average points per
//! developer. The builder splits the outstanding backlog into weeks that fit
//! that capacity, and the service wires both to the store.

mod builder;
mod capacity;
mod response;
mod service;

pub use builder::{Estimated, Plan, WeeklyBatch, build_plan};
pub use capacity::{DEFAULT_AVERAGE_STORY_POINTS, compute_capacity};
pub use response::{DeveloperResponse, IssueResponse, PlanListResponse, PlanResponse};
pub use service::{PlanService, PlanSource};
