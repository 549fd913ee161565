use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::models::{ApiResponse, CurrentScenarioResponse, ScenarioRequest, ScenarioResponse};
use crate::services::LessonService;

use super::extract::JsonOrDefault;
use super::lesson::bad_request;

/// Select the scenario the oracle reports next
pub async fn set_scenario(
    State(service): State<Arc<LessonService>>,
    JsonOrDefault(request): JsonOrDefault<ScenarioRequest>,
) -> Result<Json<ApiResponse<ScenarioResponse>>, (StatusCode, Json<ApiResponse<ScenarioResponse>>)>
{
    if let Err(e) = request.validate() {
        return Err(bad_request(format!("Validation error: {}", e)));
    }

    service.set_scenario(&request.scenario).await;
    Ok(Json(ApiResponse::ok(ScenarioResponse {
        message: format!("Scenario set to {}", request.scenario),
    })))
}

pub async fn get_scenario(
    State(service): State<Arc<LessonService>>,
) -> Json<ApiResponse<CurrentScenarioResponse>> {
    Json(ApiResponse::ok(CurrentScenarioResponse {
        scenario: service.scenario().await,
    }))
}
