use crate::validation::ActivityForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityPreset {
    pub name: &'static str,
    pub points: i64,
}

pub const ACTIVITY_LIBRARY: &[ActivityPreset] = &[
    ActivityPreset {
        name: "Team Win",
        points: 100,
    },
    ActivityPreset {
        name: "Team Round Under-Par",
        points: 50,
    },
    ActivityPreset {
        name: "Beat Scoring Record",
        points: 100,
    },
    ActivityPreset {
        name: "Team Tournament Goal",
        points: 25,
    },
    ActivityPreset {
        name: "Play day goal",
        points: 20,
    },
    ActivityPreset {
        name: "Community Service",
        points: 50,
    },
    ActivityPreset {
        name: "Close-out Drills",
        points: 10,
    },
    ActivityPreset {
        name: "Flamingo Drill",
        points: 31,
    },
    ActivityPreset {
        name: "World champion",
        points: 400,
    },
];

/// Case-insensitive substring match on preset names. A blank query matches all.
pub fn search_library(query: &str) -> Vec<ActivityPreset> {
    let needle = query.trim().to_lowercase();
    ACTIVITY_LIBRARY
        .iter()
        .filter(|preset| needle.is_empty() || preset.name.to_lowercase().contains(&needle))
        .copied()
        .collect()
}

impl ActivityPreset {
    pub fn apply_to(&self, form: &mut ActivityForm) {
        form.activity = self.name.to_string();
        form.points = self.points.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_returns_whole_library() {
        assert_eq!(search_library("  ").len(), ACTIVITY_LIBRARY.len());
    }

    #[test]
    fn search_ignores_case() {
        let names: Vec<&str> = search_library("DRILL").iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Close-out Drills", "Flamingo Drill"]);
    }

    #[test]
    fn selecting_a_preset_fills_label_and_points() {
        let mut form = ActivityForm::default();
        search_library("world")[0].apply_to(&mut form);
        assert_eq!(form.activity, "World champion");
        assert_eq!(form.points, "400");
    }
}
