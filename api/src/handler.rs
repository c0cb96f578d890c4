use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::Error as CommonError;
use dashboard::{
    view::{coin_options, ChartView, CoinOption, DashboardSnapshot, TableView},
    TickOutcome,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::service::DashboardService;

type SharedService = Arc<DashboardService>;

// Create a wrapper for our common::Error type
pub struct ApiError(CommonError);

impl From<CommonError> for ApiError {
    fn from(err: CommonError) -> Self {
        ApiError(err)
    }
}

// Convert our API error wrapper to an Axum response
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CommonError::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            CommonError::NotFound(_) => StatusCode::NOT_FOUND,
            CommonError::NetworkError(_) | CommonError::DecodeError(_) => StatusCode::BAD_GATEWAY,
            CommonError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// Everything needed to render the page in one call
pub async fn get_dashboard(State(service): State<SharedService>) -> Json<DashboardSnapshot> {
    Json(service.snapshot().await)
}

#[derive(Debug, Deserialize)]
pub struct CoinsQuery {
    pub search: Option<String>,
}

// Table region, optionally updating the search term first
pub async fn list_coins(
    State(service): State<SharedService>,
    Query(query): Query<CoinsQuery>,
) -> Json<TableView> {
    match query.search {
        Some(term) => Json(service.set_search(term).await),
        None => Json(service.dashboard().table_view().await),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub term: String,
}

pub async fn set_search(
    State(service): State<SharedService>,
    Json(request): Json<SearchRequest>,
) -> Json<TableView> {
    Json(service.set_search(request.term).await)
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub table: TableView,
}

// Manual refresh; reports "skipped" when a reload is already running
pub async fn refresh(State(service): State<SharedService>) -> Json<RefreshResponse> {
    let (outcome, error) = match service.refresh_now().await {
        TickOutcome::Completed => ("completed", None),
        TickOutcome::Skipped => ("skipped", None),
        TickOutcome::Failed(e) => ("failed", Some(e.to_string())),
    };

    Json(RefreshResponse {
        outcome,
        error,
        table: service.dashboard().table_view().await,
    })
}

pub async fn list_popular(State(service): State<SharedService>) -> Json<Vec<CoinOption>> {
    let selection = service.dashboard().selection().await;
    Json(coin_options(selection.coin_id()))
}

#[derive(Debug, Deserialize)]
pub struct SelectCoinRequest {
    #[serde(default)]
    pub coin_id: Option<String>,
}

pub async fn select_coin(
    State(service): State<SharedService>,
    Json(request): Json<SelectCoinRequest>,
) -> Result<Json<ChartView>, ApiError> {
    let view = service.select_coin(request.coin_id.as_deref()).await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct SelectWindowRequest {
    pub window: String,
}

pub async fn select_window(
    State(service): State<SharedService>,
    Json(request): Json<SelectWindowRequest>,
) -> Result<Json<ChartView>, ApiError> {
    let view = service.select_window(&request.window).await?;
    Ok(Json(view))
}

pub async fn get_chart(State(service): State<SharedService>) -> Json<ChartView> {
    Json(service.dashboard().chart_view().await)
}
