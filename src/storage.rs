use crate::errors::AppError;
use crate::ids::server_id;
use crate::models::{Activity, BackendData, Prize, wire_date};
use std::path::Path;
use tokio::fs;
use tracing::{error, warn};

pub async fn load_data(path: &Path) -> BackendData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                BackendData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BackendData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            BackendData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &BackendData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

const MOCK_PRIZES: &[(i64, &str)] = &[
    (150, "Sticker Pack"),
    (425, "Team Hat"),
    (1150, "Team Hoodie"),
];

const MOCK_ACTIVITIES: &[(&str, i64, &str)] = &[
    ("World champion", 400, "2025/11/16"),
    ("Team Win", 100, "2025/11/15"),
    ("Play day goal", 20, "2025/11/04"),
    ("Team Tournament Goal", 25, "2025/11/04"),
    ("Close-out Drills", 10, "2025/11/03"),
    ("Community Service", 50, "2025/11/01"),
    ("Close-out Drills", 10, "2025/10/25"),
    ("Team Round Under-Par", 50, "2025/10/19"),
    ("Drills at Practice", 57, "2025/10/14"),
    ("Close-out Drills", 10, "2025/10/08"),
    ("Flamingo Drill", 31, "2025/10/07"),
    ("Team Tournament Goal", 25, "2025/10/01"),
    ("Cards for veterans", 31, "2025/09/28"),
    ("Team Win", 100, "2025/09/18"),
];

/// Demo season data for a fresh install.
pub fn mock_data() -> BackendData {
    let prizes = MOCK_PRIZES
        .iter()
        .map(|(points, label)| Prize {
            id: server_id(),
            points: *points,
            label: label.to_string(),
        })
        .collect();

    let activities = MOCK_ACTIVITIES
        .iter()
        .filter_map(|(label, points, raw_date)| {
            let Some(date) = wire_date::parse(raw_date) else {
                warn!("skipping mock activity with bad date {raw_date}");
                return None;
            };
            Some(Activity {
                id: server_id(),
                label: label.to_string(),
                points: *points,
                date,
            })
        })
        .collect();

    BackendData { activities, prizes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::total_points;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("club_points_{}_{}_{}.json", name, std::process::id(), server_id()));
        path
    }

    #[test]
    fn mock_data_matches_the_demo_season() {
        let data = mock_data();
        assert_eq!(data.prizes.len(), 3);
        assert_eq!(data.activities.len(), 14);
        assert_eq!(total_points(&data.activities), 919);
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let data = load_data(&temp_path("missing")).await;
        assert!(data.activities.is_empty());
        assert!(data.prizes.is_empty());
    }

    #[tokio::test]
    async fn persisted_data_loads_back() {
        let path = temp_path("persist");
        let data = mock_data();
        persist_data(&path, &data).await.unwrap();

        let loaded = load_data(&path).await;
        assert_eq!(loaded.activities, data.activities);
        assert_eq!(loaded.prizes, data.prizes);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{not json").await.unwrap();
        assert!(load_data(&path).await.activities.is_empty());
        let _ = fs::remove_file(&path).await;
    }
}
