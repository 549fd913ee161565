//! Data models for the lesson escrow server

use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod escrow;
pub mod oracle;

pub use escrow::{ContractState, ContractStatus, LogEntry, WalletSet};
pub use oracle::{AttendanceReport, Participant};

pub const DEFAULT_LESSON_PRICE: f64 = 30.0;
pub const DEFAULT_LESSON_TITLE: &str = "Lesson";
pub const DEFAULT_TOPUP_AMOUNT: f64 = 100.0;

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Request DTO for funding a lesson
#[derive(Debug, Deserialize, Validate)]
pub struct FundLessonRequest {
    #[serde(default = "default_price")]
    pub price: f64,
    #[serde(default = "default_title")]
    #[validate(length(min = 1, max = 120))]
    pub lesson_title: String,
}

impl Default for FundLessonRequest {
    fn default() -> Self {
        Self {
            price: default_price(),
            lesson_title: default_title(),
        }
    }
}

/// Request DTO for topping up the student wallet
#[derive(Debug, Deserialize)]
pub struct TopUpRequest {
    #[serde(default = "default_topup")]
    pub amount: f64,
}

impl Default for TopUpRequest {
    fn default() -> Self {
        Self {
            amount: default_topup(),
        }
    }
}

/// Request DTO for selecting the oracle scenario
#[derive(Debug, Deserialize, Validate)]
pub struct ScenarioRequest {
    #[serde(default = "default_scenario")]
    #[validate(length(min = 1, max = 64))]
    pub scenario: String,
}

impl Default for ScenarioRequest {
    fn default() -> Self {
        Self {
            scenario: default_scenario(),
        }
    }
}

/// Request DTO for resolving the funded lesson
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ResolveRequest {
    #[validate(length(min = 1, max = 64))]
    pub scenario: Option<String>,
}

/// Message plus the resulting contract state
#[derive(Debug, Serialize, Deserialize)]
pub struct StateChangeResponse {
    pub message: String,
    pub state: ContractState,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScenarioResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentScenarioResponse {
    pub scenario: String,
}

/// Oracle data used, outcome narration and resulting state
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub oracle_data: AttendanceReport,
    pub contract_outcome: String,
    pub state: ContractState,
}

fn default_price() -> f64 {
    DEFAULT_LESSON_PRICE
}

fn default_title() -> String {
    DEFAULT_LESSON_TITLE.to_string()
}

fn default_topup() -> f64 {
    DEFAULT_TOPUP_AMOUNT
}

fn default_scenario() -> String {
    crate::services::oracle_service::DEFAULT_SCENARIO.to_string()
}
