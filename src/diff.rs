use crate::ids::is_temp_id;
use crate::models::Prize;
use std::collections::{HashMap, HashSet};

/// Network work needed to turn the saved prize list into the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrizeDiff {
    pub to_create: Vec<Prize>,
    pub to_update: Vec<Prize>,
    pub to_delete: Vec<Prize>,
}

impl PrizeDiff {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }

    pub fn len(&self) -> usize {
        self.to_create.len() + self.to_update.len() + self.to_delete.len()
    }
}

/// Drops rows without a label or with non-positive points, keeps the first row
/// per id, trims labels and orders by points ascending.
pub fn clean_draft(draft: &[Prize]) -> Vec<Prize> {
    let mut seen = HashSet::new();
    let mut cleaned: Vec<Prize> = draft
        .iter()
        .filter(|row| !row.label.trim().is_empty() && row.points > 0)
        .filter(|row| seen.insert(row.id.clone()))
        .map(|row| Prize {
            id: row.id.clone(),
            points: row.points,
            label: row.label.trim().to_string(),
        })
        .collect();
    cleaned.sort_by_key(|row| row.points);
    cleaned
}

/// Compares an already cleaned draft against the last saved snapshot.
///
/// Non-temporary ids the saved snapshot does not know are left out.
pub fn diff_prizes(saved: &[Prize], cleaned: &[Prize]) -> PrizeDiff {
    let saved_by_id: HashMap<&str, &Prize> =
        saved.iter().map(|prize| (prize.id.as_str(), prize)).collect();
    let draft_ids: HashSet<&str> = cleaned.iter().map(|prize| prize.id.as_str()).collect();

    let to_delete = saved
        .iter()
        .filter(|prize| !draft_ids.contains(prize.id.as_str()))
        .cloned()
        .collect();

    let mut to_create = Vec::new();
    let mut to_update = Vec::new();
    for row in cleaned {
        if is_temp_id(&row.id) {
            to_create.push(row.clone());
            continue;
        }
        if let Some(before) = saved_by_id.get(row.id.as_str()) {
            if before.points != row.points || before.label != row.label {
                to_update.push(row.clone());
            }
        }
    }

    PrizeDiff {
        to_create,
        to_update,
        to_delete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::temp_id;

    fn prize(id: &str, points: i64, label: &str) -> Prize {
        Prize {
            id: id.into(),
            points,
            label: label.into(),
        }
    }

    fn saved() -> Vec<Prize> {
        vec![
            prize("p1", 150, "Sticker Pack"),
            prize("p2", 425, "Team Hat"),
            prize("p3", 1150, "Team Hoodie"),
        ]
    }

    #[test]
    fn unchanged_draft_needs_no_requests() {
        let cleaned = clean_draft(&saved());
        assert!(diff_prizes(&saved(), &cleaned).is_empty());
    }

    #[test]
    fn diff_splits_create_update_delete() {
        let new_id = temp_id();
        let draft = vec![
            prize("p3", 1200, "Team Hoodie"),
            prize(&new_id, 300, "Water Bottle"),
            prize("p1", 150, "Sticker Pack"),
        ];
        let cleaned = clean_draft(&draft);
        let diff = diff_prizes(&saved(), &cleaned);

        assert_eq!(diff.to_create, vec![prize(&new_id, 300, "Water Bottle")]);
        assert_eq!(diff.to_update, vec![prize("p3", 1200, "Team Hoodie")]);
        assert_eq!(diff.to_delete, vec![prize("p2", 425, "Team Hat")]);
        assert_eq!(diff.len(), 3);
    }

    #[test]
    fn blank_zero_row_is_in_no_set() {
        let mut draft = saved();
        draft.push(prize(&temp_id(), 0, ""));
        let cleaned = clean_draft(&draft);
        assert_eq!(cleaned.len(), 3);
        assert!(diff_prizes(&saved(), &cleaned).is_empty());
    }

    #[test]
    fn saved_row_blanked_out_becomes_a_delete() {
        let draft = vec![
            prize("p1", 150, "Sticker Pack"),
            prize("p2", 0, "Team Hat"),
            prize("p3", 1150, "   "),
        ];
        let diff = diff_prizes(&saved(), &clean_draft(&draft));
        let deleted: Vec<&str> = diff.to_delete.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(deleted, vec!["p2", "p3"]);
        assert!(diff.to_create.is_empty());
        assert!(diff.to_update.is_empty());
    }

    #[test]
    fn cleaning_sorts_trims_and_keeps_first_duplicate() {
        let draft = vec![
            prize("p3", 1150, " Team Hoodie "),
            prize("p1", 150, "Sticker Pack"),
            prize("p3", 999, "Duplicate"),
        ];
        let cleaned = clean_draft(&draft);
        assert_eq!(
            cleaned,
            vec![prize("p1", 150, "Sticker Pack"), prize("p3", 1150, "Team Hoodie")]
        );
    }

    #[test]
    fn label_only_change_is_an_update() {
        let draft = vec![
            prize("p1", 150, "Sticker Sheet"),
            prize("p2", 425, "Team Hat"),
            prize("p3", 1150, "Team Hoodie"),
        ];
        let diff = diff_prizes(&saved(), &clean_draft(&draft));
        assert_eq!(diff.to_update, vec![prize("p1", 150, "Sticker Sheet")]);
    }

    #[test]
    fn unknown_server_id_is_ignored() {
        let mut draft = saved();
        draft.push(prize("ghost", 50, "Pin"));
        let diff = diff_prizes(&saved(), &clean_draft(&draft));
        assert!(diff.is_empty());
    }
}
