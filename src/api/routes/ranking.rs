use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::PlayerRatingElement;
use crate::view::CountryFilter;

#[derive(Debug, Deserialize)]
pub struct RankingParams {
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub season: String,

    /// Applied filter, uppercase or "All"
    pub country: String,

    pub players: Vec<PlayerRatingElement>,
}

#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<String>,
}

pub async fn get_ranking(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> Result<Json<RankingResponse>, ApiError> {
    let snapshot = state.loader.load_ranking().await?;
    let filter = CountryFilter::parse(params.country.as_deref().unwrap_or_default());

    Ok(Json(RankingResponse {
        season: snapshot.season.clone(),
        country: filter.to_string(),
        players: snapshot.filtered(&filter),
    }))
}

pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<CountriesResponse>, ApiError> {
    let snapshot = state.loader.load_ranking().await?;
    Ok(Json(CountriesResponse {
        countries: snapshot.countries,
    }))
}

pub async fn list_events(State(state): State<AppState>) -> Result<Json<EventsResponse>, ApiError> {
    let snapshot = state.loader.load_ranking().await?;
    Ok(Json(EventsResponse {
        events: snapshot.events,
    }))
}
