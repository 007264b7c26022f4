use crate::client::{Backend, Result};
use crate::errors::ClientError;
use crate::ids::server_id;
use crate::models::{Activity, BackendData, NewActivity, NewPrize, Prize};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::{Mutex, Notify};

/// In-memory `Backend` with switchable failures.
#[derive(Default)]
pub struct FakeBackend {
    pub data: Mutex<BackendData>,
    pub fail_create_activity: AtomicBool,
    pub fail_delete_activity: AtomicBool,
    pub fail_list: AtomicBool,
    pub failing_prize_ids: Mutex<HashSet<String>>,
    /// `version` fails this many times before answering.
    pub version_failures: AtomicU32,
    pub version_calls: AtomicU32,
    /// Makes `version` hang long past any probe timeout.
    pub stall_version: AtomicBool,
    pub deleted_activity_ids: Mutex<Vec<String>>,
    pub prize_requests: AtomicU32,
    /// When set, `create_activity` waits for a notification before answering.
    pub create_gate: Option<Notify>,
    /// When set, `create_activity` stores the row, then waits before answering.
    pub reply_gate: Option<Notify>,
    /// Signalled once a gated create has stored its row.
    pub stored: Notify,
}

impl FakeBackend {
    pub fn with_data(data: BackendData) -> Self {
        Self {
            data: Mutex::new(data),
            ..Self::default()
        }
    }

    pub fn gated(mut self) -> Self {
        self.create_gate = Some(Notify::new());
        self
    }

    pub fn reply_gated(mut self) -> Self {
        self.reply_gate = Some(Notify::new());
        self
    }

    fn refused(path: &str) -> ClientError {
        ClientError::Status {
            method: "TEST".to_string(),
            url: path.to_string(),
            status: 500,
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn version(&self) -> Result<String> {
        self.version_calls.fetch_add(1, Ordering::SeqCst);
        if self.stall_version.load(Ordering::SeqCst) {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        }
        let remaining = self.version_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.version_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(Self::refused("/version"));
        }
        Ok("test".to_string())
    }

    async fn list_activities(&self) -> Result<Vec<Activity>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::refused("/activities"));
        }
        Ok(self.data.lock().await.activities.clone())
    }

    async fn create_activity(&self, new_activity: &NewActivity) -> Result<Activity> {
        if let Some(gate) = &self.create_gate {
            gate.notified().await;
        }
        if self.fail_create_activity.load(Ordering::SeqCst) {
            return Err(Self::refused("/activities"));
        }
        let activity = new_activity.clone().with_id(server_id());
        self.data.lock().await.activities.push(activity.clone());
        if let Some(gate) = &self.reply_gate {
            self.stored.notify_one();
            gate.notified().await;
        }
        Ok(activity)
    }

    async fn delete_activity(&self, id: &str) -> Result<()> {
        self.deleted_activity_ids.lock().await.push(id.to_string());
        if self.fail_delete_activity.load(Ordering::SeqCst) {
            return Err(Self::refused("/activities"));
        }
        let mut data = self.data.lock().await;
        let before = data.activities.len();
        data.activities.retain(|activity| activity.id != id);
        if data.activities.len() == before {
            return Err(ClientError::Status {
                method: "DELETE".to_string(),
                url: format!("/activities/{id}"),
                status: 404,
            });
        }
        Ok(())
    }

    async fn list_prizes(&self) -> Result<Vec<Prize>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::refused("/prizes"));
        }
        let mut prizes = self.data.lock().await.prizes.clone();
        prizes.sort_by_key(|prize| prize.points);
        Ok(prizes)
    }

    async fn create_prize(&self, new_prize: &NewPrize) -> Result<Prize> {
        self.prize_requests.fetch_add(1, Ordering::SeqCst);
        let prize = Prize {
            id: server_id(),
            points: new_prize.points,
            label: new_prize.label.clone(),
        };
        self.data.lock().await.prizes.push(prize.clone());
        Ok(prize)
    }

    async fn update_prize(&self, id: &str, update: &NewPrize) -> Result<Prize> {
        self.prize_requests.fetch_add(1, Ordering::SeqCst);
        if self.failing_prize_ids.lock().await.contains(id) {
            return Err(Self::refused("/prizes"));
        }
        let mut data = self.data.lock().await;
        let prize = data
            .prizes
            .iter_mut()
            .find(|prize| prize.id == id)
            .ok_or_else(|| Self::refused("/prizes"))?;
        prize.points = update.points;
        prize.label = update.label.clone();
        Ok(prize.clone())
    }

    async fn delete_prize(&self, id: &str) -> Result<()> {
        self.prize_requests.fetch_add(1, Ordering::SeqCst);
        if self.failing_prize_ids.lock().await.contains(id) {
            return Err(Self::refused("/prizes"));
        }
        self.data.lock().await.prizes.retain(|prize| prize.id != id);
        Ok(())
    }
}
