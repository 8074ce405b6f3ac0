//! GetPlan boundary operation

use async_trait::async_trait;
use tracing::{debug, info};

use super::builder::build_plan;
use super::capacity::compute_capacity;
use super::response::PlanListResponse;
use crate::domain::Story;
use crate::store::StoreResponse;

/// Read side the planner needs from persistence
#[async_trait]
pub trait PlanSource: Send + Sync {
    /// Number of registered developers
    async fn developer_count(&self) -> StoreResponse<u64>;

    /// NEW and ESTIMATED stories in insertion order
    async fn backlog(&self) -> StoreResponse<Vec<Story>>;
}

/// Computes the weekly plan from the current developers and backlog
pub struct PlanService<S> {
    source: S,
    average_story_points: u32,
    date_format: String,
}

impl<S: PlanSource> PlanService<S> {
    pub fn new(source: S, average_story_points: u32, date_format: impl Into<String>) -> Self {
        Self {
            source,
            average_story_points,
            date_format: date_format.into(),
        }
    }

    pub async fn get_plan(&self) -> StoreResponse<PlanListResponse> {
        info!("Calculating plan");

        let developers = self.source.developer_count().await?;
        debug!(developers, "get_plan: developer count");

        let capacity = compute_capacity(developers, self.average_story_points);
        if capacity <= 0 {
            info!("No developers, plan is empty");
            return Ok(PlanListResponse::default());
        }
        debug!(capacity, "get_plan: weekly capacity");

        let backlog = self.source.backlog().await?;
        debug!(stories = backlog.len(), "get_plan: outstanding stories");

        let plan = build_plan(backlog, capacity);
        info!(weeks = plan.len(), "Plan calculated");

        Ok(PlanListResponse::from_plan(&plan, &self.date_format))
    }
}
