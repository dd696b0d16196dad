use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::loader::PlayerSnapshot;
use crate::models::PlayerId;

pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerSnapshot>, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::BadRequest("player id must not be empty".to_string()));
    }

    let snapshot = state.loader.load_player(&PlayerId::from(id)).await?;
    Ok(Json(snapshot))
}
