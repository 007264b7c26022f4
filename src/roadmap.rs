use crate::ledger::total_points;
use crate::models::{Activity, Prize};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrizeMilestone {
    pub prize: Prize,
    pub achieved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapProgress {
    pub current_points: i64,
    pub goal: i64,
    pub percent: f64,
    pub milestones: Vec<PrizeMilestone>,
}

/// Progress toward the highest prize threshold.
pub fn build_roadmap(activities: &[Activity], prizes: &[Prize]) -> RoadmapProgress {
    let current_points = total_points(activities);

    let mut ordered: Vec<Prize> = prizes.to_vec();
    ordered.sort_by_key(|prize| prize.points);

    let goal = ordered.last().map(|prize| prize.points).unwrap_or(0);
    let percent = if goal > 0 {
        (current_points as f64 / goal as f64 * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let milestones = ordered
        .into_iter()
        .map(|prize| PrizeMilestone {
            achieved: current_points >= prize.points,
            prize,
        })
        .collect();

    RoadmapProgress {
        current_points,
        goal,
        percent,
        milestones,
    }
}
