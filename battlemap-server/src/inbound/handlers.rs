use super::api::{ApiError, ApiSuccess};
use crate::domain::models::{BattleMap, CreateMapRequest};
use crate::domain::ports::MapService;
use crate::inbound::AppState;

use battlemap_core::{GenerationError, GenerationRequest, Outcome, Theme, ThemeRegistry};

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The response body data field for successful [BattleMap] creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateMapResponseData {
    id: String,
    outcome: Outcome,
    buildings_placed: u32,
    roads_placed: u32,
    reproducible: bool,
}

impl From<&BattleMap> for CreateMapResponseData {
    fn from(map: &BattleMap) -> Self {
        Self {
            id: map.id().to_string(),
            outcome: map.outcome(),
            buildings_placed: map.buildings_placed(),
            roads_placed: map.roads_placed(),
            reproducible: map.is_reproducible(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub(super) enum ParseMapHttpRequestError {
    #[error(transparent)]
    Preset(GenerationError),
}

/// The body of a [BattleMap] creation request.
///
/// Only the dimensions are mandatory; counts fall back to the preset's
/// defaults and an absent seed yields a non-reproducible map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateMapHttpRequestBody {
    width: u32,
    height: u32,
    road_count: Option<u32>,
    building_count: Option<u32>,
    theme: Option<String>,
    seed: Option<u64>,
}

impl CreateMapHttpRequestBody {
    /// Converts the HTTP request body into a domain request.
    fn try_into_domain(self) -> Result<CreateMapRequest, ParseMapHttpRequestError> {
        let theme = resolve_theme(self.theme.as_deref())?;
        let defaults = theme.request_defaults();

        Ok(CreateMapRequest::new(GenerationRequest {
            width: self.width,
            height: self.height,
            road_count: self.road_count.unwrap_or(defaults.road_count),
            building_count: self.building_count.unwrap_or(defaults.building_count),
            theme,
            seed: self.seed,
            step_budget: None,
        }))
    }
}

/// The query string accepted by the direct render endpoint, the web
/// equivalent of the CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderMapQueryParams {
    width: Option<u32>,
    height: Option<u32>,
    road_count: Option<u32>,
    building_count: Option<u32>,
    theme: Option<String>,
    seed: Option<u64>,
}

impl RenderMapQueryParams {
    fn try_into_domain(self) -> Result<CreateMapRequest, ParseMapHttpRequestError> {
        let theme = resolve_theme(self.theme.as_deref())?;
        let defaults = theme.request_defaults();

        Ok(CreateMapRequest::new(GenerationRequest {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            road_count: self.road_count.unwrap_or(defaults.road_count),
            building_count: self.building_count.unwrap_or(defaults.building_count),
            theme,
            seed: self.seed,
            step_budget: None,
        }))
    }
}

fn resolve_theme(name: Option<&str>) -> Result<Theme, ParseMapHttpRequestError> {
    match name {
        Some(name) => ThemeRegistry::resolve(name).map_err(ParseMapHttpRequestError::Preset),
        None => Ok(Theme::default()),
    }
}

/// Create a new [BattleMap].
///
/// # Responses
///
/// - 201 Created: the [BattleMap] was successfully created.
/// - 422 Unprocessable entity: the creation request had invalid parameters.
pub(super) async fn create_map_handler<MS: MapService>(
    State(state): State<AppState<MS>>,
    Json(body): Json<CreateMapHttpRequestBody>,
) -> Result<ApiSuccess<CreateMapResponseData>, ApiError> {
    let domain_req = body.try_into_domain()?;
    state
        .map_service
        .create_map(&domain_req)
        .await
        .map_err(ApiError::from)
        .map(|ref map| ApiSuccess::new(StatusCode::CREATED, map.into()))
}

/// Generate a map from query-string parameters and return it as SVG markup.
///
/// # Responses
///
/// - 200 OK with an `image/svg+xml` body.
/// - 422 Unprocessable entity: the parameters had invalid values.
pub(super) async fn render_map_handler<MS: MapService>(
    State(state): State<AppState<MS>>,
    Query(params): Query<RenderMapQueryParams>,
) -> Result<Response, ApiError> {
    let domain_req = params.try_into_domain()?;

    let markup = state
        .map_service
        .render_map(&domain_req)
        .await
        .map_err(ApiError::from)?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], markup).into_response())
}
