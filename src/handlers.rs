use crate::errors::AppError;
use crate::ids::server_id;
use crate::models::{
    Activity, BackendData, NewActivity, NewPrize, Prize, StatusResponse, VersionResponse,
};
use crate::state::AppState;
use crate::storage::persist_data;
use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;

pub async fn root() -> Json<StatusResponse> {
    status("ok")
}

pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn list_activities(State(state): State<AppState>) -> Json<Vec<Activity>> {
    let data = state.data.lock().await;
    let mut activities = data.activities.clone();
    activities.sort_by(|a, b| b.date.cmp(&a.date));
    Json(activities)
}

pub async fn create_activity(
    State(state): State<AppState>,
    Json(payload): Json<NewActivity>,
) -> Result<Json<Activity>, AppError> {
    let label = payload.label.trim();
    if label.is_empty() {
        return Err(AppError::bad_request("activity label must not be empty"));
    }

    let activity = Activity {
        id: server_id(),
        label: label.to_string(),
        points: payload.points,
        date: payload.date,
    };

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    next.activities.push(activity.clone());
    commit(&state, &mut data, next).await?;

    info!("stored activity {} ({} pts)", activity.id, activity.points);
    Ok(Json(activity))
}

pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    next.activities.retain(|activity| activity.id != id);
    if next.activities.len() == data.activities.len() {
        return Err(AppError::not_found("Activity not found"));
    }
    commit(&state, &mut data, next).await?;

    info!("deleted activity {id}");
    Ok(status("deleted"))
}

pub async fn list_prizes(State(state): State<AppState>) -> Json<Vec<Prize>> {
    let data = state.data.lock().await;
    let mut prizes = data.prizes.clone();
    prizes.sort_by_key(|prize| prize.points);
    Json(prizes)
}

pub async fn create_prize(
    State(state): State<AppState>,
    Json(payload): Json<NewPrize>,
) -> Result<Json<Prize>, AppError> {
    let prize = Prize {
        id: server_id(),
        points: payload.points,
        label: payload.label.trim().to_string(),
    };

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    next.prizes.push(prize.clone());
    commit(&state, &mut data, next).await?;

    info!("stored prize {} at {} pts", prize.id, prize.points);
    Ok(Json(prize))
}

pub async fn update_prize(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NewPrize>,
) -> Result<Json<Prize>, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let updated = {
        let prize = next
            .prizes
            .iter_mut()
            .find(|prize| prize.id == id)
            .ok_or_else(|| AppError::not_found("Prize not found"))?;
        prize.points = payload.points;
        prize.label = payload.label.trim().to_string();
        prize.clone()
    };
    commit(&state, &mut data, next).await?;

    Ok(Json(updated))
}

pub async fn delete_prize(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    next.prizes.retain(|prize| prize.id != id);
    if next.prizes.len() == data.prizes.len() {
        return Err(AppError::not_found("Prize not found"));
    }
    commit(&state, &mut data, next).await?;

    Ok(status("deleted"))
}

/// Writes `next` to disk and only then makes it the live state.
async fn commit(
    state: &AppState,
    live: &mut BackendData,
    next: BackendData,
) -> Result<(), AppError> {
    persist_data(&state.data_path, &next).await?;
    *live = next;
    Ok(())
}

fn status(value: &str) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: value.to_string(),
    })
}
