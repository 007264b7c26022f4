use crate::client::Backend;
use crate::errors::{ClientError, MutationError};
use crate::models::{Activity, LedgerEntry, NewActivity, NewPrize, Prize};
use crate::roadmap::{RoadmapProgress, build_roadmap};
use crate::store::{ActivityStore, ConfirmOutcome, DeletePlan, PrizeStore};
use crate::validation::{ActivityForm, validate_activity_form};
use futures::future::{BoxFuture, FutureExt, join_all};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Applies activity and prize changes locally first, then reconciles with
/// the backend. Any failure is corrected by re-fetching from the backend.
///
/// Store locks are never held across a network call.
pub struct MutationController<B> {
    backend: B,
    activities: Mutex<ActivityStore>,
    prizes: Mutex<PrizeStore>,
}

impl<B: Backend> MutationController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_state(backend, Vec::new(), Vec::new())
    }

    pub fn with_state(backend: B, activities: Vec<Activity>, prizes: Vec<Prize>) -> Self {
        Self {
            backend,
            activities: Mutex::new(ActivityStore::new(activities)),
            prizes: Mutex::new(PrizeStore::new(prizes)),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn activities(&self) -> Vec<Activity> {
        self.activities.lock().await.entries()
    }

    pub async fn ledger(&self) -> Vec<LedgerEntry> {
        self.activities.lock().await.ledger()
    }

    pub async fn prizes(&self) -> Vec<Prize> {
        self.prizes.lock().await.saved().to_vec()
    }

    pub async fn roadmap(&self) -> RoadmapProgress {
        let activities = self.activities().await;
        let prizes = self.prizes().await;
        build_roadmap(&activities, &prizes)
    }

    pub async fn refresh_activities(&self) -> Result<(), MutationError> {
        let fresh = self
            .backend
            .list_activities()
            .await
            .map_err(MutationError::Refresh)?;
        self.activities.lock().await.replace_confirmed(fresh);
        Ok(())
    }

    pub async fn refresh_prizes(&self) -> Result<(), MutationError> {
        let fresh = self
            .backend
            .list_prizes()
            .await
            .map_err(MutationError::Refresh)?;
        self.prizes.lock().await.replace_saved(fresh);
        Ok(())
    }

    /// Validates the form and, if it passes, creates the activity.
    pub async fn submit_activity_form(
        &self,
        form: &ActivityForm,
    ) -> Result<Activity, MutationError> {
        let new_activity = validate_activity_form(form).map_err(MutationError::Invalid)?;
        self.create_activity(new_activity).await
    }

    pub async fn create_activity(
        &self,
        new_activity: NewActivity,
    ) -> Result<Activity, MutationError> {
        let temp_id = self
            .activities
            .lock()
            .await
            .begin_create(new_activity.clone());

        let canonical = match self.backend.create_activity(&new_activity).await {
            Ok(canonical) => canonical,
            Err(err) => {
                warn!("create activity failed, rolling back {temp_id}: {err}");
                self.activities.lock().await.fail_create(&temp_id);
                self.resync_activities().await;
                return Err(MutationError::Create(err));
            }
        };

        let outcome = self
            .activities
            .lock()
            .await
            .confirm_create(&temp_id, canonical.clone());
        if let ConfirmOutcome::Abandoned(orphan) = outcome {
            info!("activity {} was removed before confirmation, deleting it", orphan.id);
            if let Err(err) = self.backend.delete_activity(&orphan.id).await {
                warn!("cleanup delete of {} failed: {err}", orphan.id);
                self.resync_activities().await;
                return Err(MutationError::Delete(err));
            }
        }
        Ok(canonical)
    }

    pub async fn delete_activity(&self, id: &str) -> Result<(), MutationError> {
        let plan = self.activities.lock().await.begin_delete(id);
        let DeletePlan::Remote(id) = plan else {
            return Ok(());
        };

        if let Err(err) = self.backend.delete_activity(&id).await {
            warn!("delete activity {id} failed: {err}");
            self.resync_activities().await;
            return Err(MutationError::Delete(err));
        }
        Ok(())
    }

    async fn resync_activities(&self) {
        if let Err(err) = self.refresh_activities().await {
            error!("could not re-fetch activities: {err}");
        }
    }

    /// Runs `f` against the prize store, e.g. to open an edit session or change draft rows.
    pub async fn edit_prizes<R>(&self, f: impl FnOnce(&mut PrizeStore) -> R) -> R {
        f(&mut *self.prizes.lock().await)
    }

    /// Sends every create, update and delete the draft implies at once. On any
    /// failure the saved ladder and the draft are left as they were.
    pub async fn save_prizes(&self) -> Result<(), MutationError> {
        let plan = self
            .prizes
            .lock()
            .await
            .plan_save()
            .ok_or(MutationError::NotEditing)?;

        let creates: Vec<NewPrize> = plan.to_create.iter().map(NewPrize::from).collect();
        let updates: Vec<(&str, NewPrize)> = plan
            .to_update
            .iter()
            .map(|prize| (prize.id.as_str(), NewPrize::from(prize)))
            .collect();

        let mut requests: Vec<BoxFuture<'_, Result<(), ClientError>>> =
            Vec::with_capacity(plan.len());
        for prize in &plan.to_delete {
            requests.push(self.backend.delete_prize(&prize.id).boxed());
        }
        for new_prize in &creates {
            requests.push(self.backend.create_prize(new_prize).map(|r| r.map(drop)).boxed());
        }
        for (id, update) in &updates {
            requests.push(self.backend.update_prize(id, update).map(|r| r.map(drop)).boxed());
        }

        let total = requests.len();
        let failures: Vec<ClientError> = join_all(requests)
            .await
            .into_iter()
            .filter_map(Result::err)
            .collect();
        if !failures.is_empty() {
            for err in &failures {
                error!("prize save request failed: {err}");
            }
            return Err(MutationError::PrizeSave {
                failed: failures.len(),
                total,
            });
        }

        info!(
            "saved prizes: {} created, {} updated, {} deleted",
            creates.len(),
            updates.len(),
            plan.to_delete.len()
        );
        self.refresh_prizes().await
    }
}
