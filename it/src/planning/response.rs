//! Plan presentation
//!
//! Turns a built plan into serializable response records and a coloured
//! text rendering for the terminal.

use colored::*;
use serde::{Deserialize, Serialize};

use super::builder::Plan;
use crate::domain::{Developer, DeveloperId, IssueId, IssueType, Story};

/// Developer reference attached to an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperResponse {
    pub id: DeveloperId,
    pub name: String,
}

impl From<&Developer> for DeveloperResponse {
    fn from(developer: &Developer) -> Self {
        Self {
            id: developer.id,
            name: developer.name.clone(),
        }
    }
}

/// A planned issue as shown to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    pub id: IssueId,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub title: String,
    pub description: Option<String>,
    pub story_point: u32,
    pub creation_date: String,
    pub status: String,
    pub developer: Option<DeveloperResponse>,
}

impl IssueResponse {
    pub fn from_story(story: &Story, date_format: &str) -> Self {
        Self {
            id: story.id,
            issue_type: story.issue_type(),
            title: story.title.clone(),
            description: story.description.clone(),
            story_point: story.story_point,
            creation_date: story.creation_date.format(date_format).to_string(),
            status: story.status.to_string(),
            developer: story.developer.as_ref().map(DeveloperResponse::from),
        }
    }
}

/// One week of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub week: u32,
    pub issues: Vec<IssueResponse>,
}

impl PlanResponse {
    pub fn total_points(&self) -> u64 {
        self.issues.iter().map(|i| u64::from(i.story_point)).sum()
    }
}

/// The full plan, week 1 first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanListResponse {
    pub plans: Vec<PlanResponse>,
}

impl PlanListResponse {
    pub fn from_plan(plan: &Plan<Story>, date_format: &str) -> Self {
        let plans = plan
            .weeks()
            .iter()
            .map(|batch| PlanResponse {
                week: batch.week,
                issues: batch
                    .stories
                    .iter()
                    .map(|story| IssueResponse::from_story(story, date_format))
                    .collect(),
            })
            .collect();
        Self { plans }
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Human-readable rendering, one block per week
    pub fn render_text(&self) -> String {
        if self.plans.is_empty() {
            return "No plan: no developers or no outstanding stories".to_string();
        }

        let mut out = String::new();
        for plan in &self.plans {
            out.push_str(&format!(
                "{} {}\n",
                format!("Week {}", plan.week).bold(),
                format!("({} points)", plan.total_points()).dimmed()
            ));
            for issue in &plan.issues {
                let assignee = issue
                    .developer
                    .as_ref()
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| "unassigned".to_string());
                out.push_str(&format!(
                    "  #{:<5} {:>3}pt  {:<10} {}  {}\n",
                    issue.id,
                    issue.story_point,
                    issue.status,
                    issue.title,
                    assignee.cyan()
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StoryStatus;
    use crate::planning::build_plan;
    use chrono::{TimeZone, Utc};

    fn story(id: IssueId, points: u32, developer: Option<Developer>) -> Story {
        Story {
            id,
            title: format!("Story {}", id),
            description: None,
            story_point: points,
            status: StoryStatus::New,
            creation_date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            developer,
        }
    }

    #[test]
    fn test_from_plan_keeps_weeks_and_order() {
        let backlog = vec![
            story(1, 10, None),
            story(2, 10, Some(Developer::new(4, "Grace"))),
            story(3, 5, None),
        ];
        let plan = build_plan(backlog, 20);

        let response = PlanListResponse::from_plan(&plan, "%Y-%m-%d");

        assert_eq!(response.plans.len(), 2);
        assert_eq!(response.plans[0].week, 1);
        assert_eq!(response.plans[0].issues.len(), 2);
        assert_eq!(response.plans[0].total_points(), 20);
        assert_eq!(response.plans[1].issues[0].id, 3);

        let assigned = &response.plans[0].issues[1];
        assert_eq!(
            assigned.developer,
            Some(DeveloperResponse {
                id: 4,
                name: "Grace".to_string()
            })
        );
        assert_eq!(assigned.creation_date, "2024-03-01");
        assert_eq!(assigned.issue_type, IssueType::Story);
        assert_eq!(assigned.status, "NEW");
    }

    #[test]
    fn test_json_shape() {
        let plan = build_plan(vec![story(1, 3, None)], 20);
        let response = PlanListResponse::from_plan(&plan, "%Y-%m-%d %H:%M:%S");

        let json = serde_json::to_value(&response).unwrap();
        let issue = &json["plans"][0]["issues"][0];
        assert_eq!(json["plans"][0]["week"], 1);
        assert_eq!(issue["type"], "STORY");
        assert_eq!(issue["storyPoint"], 3);
        assert_eq!(issue["creationDate"], "2024-03-01 09:30:00");
        assert!(issue["developer"].is_null());
    }

    #[test]
    fn test_render_text() {
        colored::control::set_override(false);
        let plan = build_plan(vec![story(1, 3, Some(Developer::new(2, "Linus")))], 20);
        let text = PlanListResponse::from_plan(&plan, "%Y-%m-%d").render_text();

        assert!(text.contains("Week 1"));
        assert!(text.contains("(3 points)"));
        assert!(text.contains("Story 1"));
        assert!(text.contains("Linus"));
    }

    #[test]
    fn test_render_empty() {
        let text = PlanListResponse::default().render_text();
        assert!(text.starts_with("No plan"));
    }
}
