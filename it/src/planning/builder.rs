//! Weekly plan builder
//!
//! Splits an ordered backlog into consecutive weeks with a single greedy
//! pass. A week closes as soon as its load reaches capacity; a story that
//! would push an open week past capacity starts the next week instead and
//! seeds that week's load. A story is never split or dropped, so one whose
//! points alone exceed capacity sits alone in its own week.

use std::mem;

use tracing::debug;

/// Anything with a point estimate can be planned
pub trait Estimated {
    fn points(&self) -> u32;
}

/// The stories scheduled for one week
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyBatch<T> {
    /// 1-based week number
    pub week: u32,
    /// Stories in backlog order
    pub stories: Vec<T>,
}

impl<T: Estimated> WeeklyBatch<T> {
    fn new(week: u32) -> Self {
        Self {
            week,
            stories: Vec::new(),
        }
    }

    /// Sum of story points scheduled this week
    pub fn load(&self) -> i64 {
        self.stories.iter().map(|s| i64::from(s.points())).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

/// Ordered weekly batches, week 1 first
#[derive(Debug, Clone, PartialEq)]
pub struct Plan<T> {
    weeks: Vec<WeeklyBatch<T>>,
}

impl<T> Plan<T> {
    pub fn empty() -> Self {
        Self { weeks: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Number of weeks in the plan
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn weeks(&self) -> &[WeeklyBatch<T>] {
        &self.weeks
    }

    pub fn into_weeks(self) -> Vec<WeeklyBatch<T>> {
        self.weeks
    }
}

impl<T> Default for Plan<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Partition `backlog` into weeks holding at most `capacity` points each.
pub fn build_plan<T: Estimated>(backlog: Vec<T>, capacity: i64) -> Plan<T> {
    if capacity <= 0 || backlog.is_empty() {
        debug!(capacity, backlog = backlog.len(), "build_plan: nothing to plan");
        return Plan::empty();
    }

    let mut weeks = Vec::new();
    let mut open = WeeklyBatch::new(1);
    let mut running: i64 = 0;

    for story in backlog {
        let points = i64::from(story.points());

        if !open.is_empty() && running + points > capacity {
            let next = open.week + 1;
            weeks.push(mem::replace(&mut open, WeeklyBatch::new(next)));
            running = 0;
        }

        running += points;
        open.stories.push(story);

        if running >= capacity {
            let next = open.week + 1;
            weeks.push(mem::replace(&mut open, WeeklyBatch::new(next)));
            running = 0;
        }
    }

    if !open.is_empty() {
        weeks.push(open);
    }

    debug!(capacity, weeks = weeks.len(), "build_plan: done");
    Plan { weeks }
}
