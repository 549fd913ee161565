use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::escrow::ContractError;
use crate::models::{
    ApiResponse, ContractState, FundLessonRequest, ResolveRequest, ResolveResponse,
    StateChangeResponse, TopUpRequest,
};
use crate::services::LessonService;

use super::extract::JsonOrDefault;

type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

/// Current contract state
pub async fn get_state(
    State(service): State<Arc<LessonService>>,
) -> Json<ApiResponse<ContractState>> {
    Json(ApiResponse::ok(service.state().await))
}

/// Reset balances, status and log
pub async fn reset(
    State(service): State<Arc<LessonService>>,
) -> Json<ApiResponse<StateChangeResponse>> {
    let state = service.reset().await;
    Json(ApiResponse::ok(StateChangeResponse {
        message: "System reset successfully".to_string(),
        state,
    }))
}

/// Fund a lesson from the student wallet
pub async fn fund_lesson(
    State(service): State<Arc<LessonService>>,
    JsonOrDefault(request): JsonOrDefault<FundLessonRequest>,
) -> ApiResult<StateChangeResponse> {
    if let Err(e) = request.validate() {
        return Err(bad_request(format!("Validation error: {}", e)));
    }

    match service.fund_lesson(request.price, &request.lesson_title).await {
        Ok((message, state)) => Ok(Json(ApiResponse::ok(StateChangeResponse { message, state }))),
        Err(e) => Err(contract_error(e)),
    }
}

/// Add funds to the student wallet
pub async fn topup_student(
    State(service): State<Arc<LessonService>>,
    JsonOrDefault(request): JsonOrDefault<TopUpRequest>,
) -> ApiResult<StateChangeResponse> {
    match service.topup_student(request.amount).await {
        Ok((message, state)) => Ok(Json(ApiResponse::ok(StateChangeResponse { message, state }))),
        Err(e) => Err(contract_error(e)),
    }
}

/// Fetch oracle data and settle the funded lesson
pub async fn resolve_lesson(
    State(service): State<Arc<LessonService>>,
    JsonOrDefault(request): JsonOrDefault<ResolveRequest>,
) -> ApiResult<ResolveResponse> {
    if let Err(e) = request.validate() {
        return Err(bad_request(format!("Validation error: {}", e)));
    }

    match service.resolve(request.scenario.as_deref()).await {
        Ok(result) => Ok(Json(ApiResponse::ok(ResolveResponse {
            oracle_data: result.oracle_data,
            contract_outcome: result.narration,
            state: result.state,
        }))),
        Err(e) => Err(contract_error(e)),
    }
}

pub(crate) fn bad_request<T>(message: String) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::err(message)))
}

fn contract_error<T>(err: ContractError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = match err {
        ContractError::AlreadyFunded | ContractError::NotFunded => StatusCode::CONFLICT,
        ContractError::InsufficientFunds { .. } | ContractError::InvalidAmount { .. } => {
            StatusCode::BAD_REQUEST
        }
    };
    tracing::warn!(%status, error = %err, "contract request rejected");
    (status, Json(ApiResponse::err(err.to_string())))
}
