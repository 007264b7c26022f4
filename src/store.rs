use crate::diff::{PrizeDiff, clean_draft, diff_prizes};
use crate::ids::temp_id;
use crate::ledger::build_ledger;
use crate::models::{Activity, LedgerEntry, NewActivity, Prize};
use std::collections::HashSet;

/// What a delete has to do once the row is gone locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletePlan {
    /// The row was confirmed; the server must be told.
    Remote(String),
    /// The row was still pending; nothing exists server-side yet.
    LocalOnly,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Replaced,
    /// The pending row was deleted while its create was in flight.
    Abandoned(Activity),
}

/// Local activity state: rows the server confirmed plus optimistic rows
/// still waiting on a create.
#[derive(Debug, Clone, Default)]
pub struct ActivityStore {
    confirmed: Vec<Activity>,
    pending: Vec<Activity>,
    abandoned: HashSet<String>,
}

impl ActivityStore {
    pub fn new(confirmed: Vec<Activity>) -> Self {
        Self {
            confirmed,
            ..Self::default()
        }
    }

    /// Pending rows first (newest first), then confirmed rows.
    pub fn entries(&self) -> Vec<Activity> {
        self.pending
            .iter()
            .chain(self.confirmed.iter())
            .cloned()
            .collect()
    }

    pub fn ledger(&self) -> Vec<LedgerEntry> {
        build_ledger(&self.entries())
    }

    pub fn ids(&self) -> HashSet<String> {
        self.pending
            .iter()
            .chain(self.confirmed.iter())
            .map(|activity| activity.id.clone())
            .collect()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.iter().any(|activity| activity.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.confirmed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Prepends an optimistic row and returns its temporary id.
    pub fn begin_create(&mut self, new_activity: NewActivity) -> String {
        let id = temp_id();
        self.pending.insert(0, new_activity.with_id(id.clone()));
        id
    }

    pub fn confirm_create(&mut self, temp_id: &str, canonical: Activity) -> ConfirmOutcome {
        if self.abandoned.remove(temp_id) {
            // A refresh may already have pulled the row in.
            self.confirmed.retain(|activity| activity.id != canonical.id);
            return ConfirmOutcome::Abandoned(canonical);
        }
        self.pending.retain(|activity| activity.id != temp_id);
        self.confirmed.retain(|activity| activity.id != canonical.id);
        self.confirmed.insert(0, canonical);
        ConfirmOutcome::Replaced
    }

    pub fn fail_create(&mut self, temp_id: &str) {
        self.abandoned.remove(temp_id);
        self.pending.retain(|activity| activity.id != temp_id);
    }

    pub fn begin_delete(&mut self, id: &str) -> DeletePlan {
        if self.is_pending(id) {
            self.pending.retain(|activity| activity.id != id);
            self.abandoned.insert(id.to_string());
            return DeletePlan::LocalOnly;
        }
        let before = self.confirmed.len();
        self.confirmed.retain(|activity| activity.id != id);
        if self.confirmed.len() == before {
            DeletePlan::Missing
        } else {
            DeletePlan::Remote(id.to_string())
        }
    }

    /// Swaps in the authoritative list. Creates still in flight stay pending.
    pub fn replace_confirmed(&mut self, activities: Vec<Activity>) {
        self.confirmed = activities;
    }
}

/// Saved prize ladder plus the working copy of an edit session.
#[derive(Debug, Clone, Default)]
pub struct PrizeStore {
    saved: Vec<Prize>,
    draft: Option<Vec<Prize>>,
}

impl PrizeStore {
    pub fn new(mut saved: Vec<Prize>) -> Self {
        saved.sort_by_key(|prize| prize.points);
        Self { saved, draft: None }
    }

    pub fn saved(&self) -> &[Prize] {
        &self.saved
    }

    pub fn draft(&self) -> Option<&[Prize]> {
        self.draft.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.saved.clone());
        }
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Appends a blank row to the draft, starting an edit session if needed.
    pub fn add_row(&mut self) -> String {
        let id = temp_id();
        self.draft.get_or_insert_with(|| self.saved.clone()).push(Prize {
            id: id.clone(),
            points: 0,
            label: String::new(),
        });
        id
    }

    pub fn update_row(&mut self, id: &str, points: i64, label: impl Into<String>) -> bool {
        let Some(row) = self
            .draft
            .as_mut()
            .and_then(|draft| draft.iter_mut().find(|row| row.id == id))
        else {
            return false;
        };
        row.points = points;
        row.label = label.into();
        true
    }

    pub fn remove_row(&mut self, id: &str) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        let before = draft.len();
        draft.retain(|row| row.id != id);
        draft.len() != before
    }

    /// The requests a save would issue, or `None` outside an edit session.
    pub fn plan_save(&self) -> Option<PrizeDiff> {
        self.draft
            .as_ref()
            .map(|draft| diff_prizes(&self.saved, &clean_draft(draft)))
    }

    /// Installs the authoritative ladder and closes the edit session.
    pub fn replace_saved(&mut self, mut prizes: Vec<Prize>) {
        prizes.sort_by_key(|prize| prize.points);
        self.saved = prizes;
        self.draft = None;
    }
}
