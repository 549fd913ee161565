//! Lesson service layer - serializes every request against the contract and oracle

use tokio::sync::Mutex;
use tracing::info;

use crate::config::AppConfig;
use crate::escrow::{ContractError, SmartContract};
use crate::models::{AttendanceReport, ContractState};
use crate::services::oracle_service::Oracle;

/// Outcome of a resolve request, with the data it was decided on
#[derive(Debug, Clone)]
pub struct ResolveResult {
    pub oracle_data: AttendanceReport,
    pub narration: String,
    pub state: ContractState,
}

/// Owns the single contract and oracle instance.
///
/// Lock order is always oracle, then contract.
pub struct LessonService {
    contract: Mutex<SmartContract>,
    oracle: Mutex<Oracle>,
}

impl LessonService {
    pub fn new(contract: SmartContract, oracle: Oracle) -> Self {
        Self {
            contract: Mutex::new(contract),
            oracle: Mutex::new(oracle),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            SmartContract::new(config.contract.clone()),
            Oracle::new(&config.default_scenario),
        )
    }

    pub async fn state(&self) -> ContractState {
        self.contract.lock().await.get_state()
    }

    pub async fn reset(&self) -> ContractState {
        let mut contract = self.contract.lock().await;
        contract.reset();
        contract.get_state()
    }

    pub async fn fund_lesson(
        &self,
        price: f64,
        lesson_title: &str,
    ) -> Result<(String, ContractState), ContractError> {
        let mut contract = self.contract.lock().await;
        let message = contract.fund_lesson(price, lesson_title)?;
        Ok((message, contract.get_state()))
    }

    pub async fn topup_student(
        &self,
        amount: f64,
    ) -> Result<(String, ContractState), ContractError> {
        let mut contract = self.contract.lock().await;
        let message = contract.topup_student(amount)?;
        Ok((message, contract.get_state()))
    }

    pub async fn set_scenario(&self, key: &str) {
        self.oracle.lock().await.set_scenario(key);
    }

    pub async fn scenario(&self) -> String {
        self.oracle.lock().await.scenario().key().to_string()
    }

    /// Optionally switch scenario, fetch oracle data and settle the lesson.
    ///
    /// A scenario override sticks for later requests even if the contract
    /// turns out not to be funded.
    pub async fn resolve(&self, scenario: Option<&str>) -> Result<ResolveResult, ContractError> {
        let mut oracle = self.oracle.lock().await;
        if let Some(key) = scenario {
            oracle.set_scenario(key);
        }
        let oracle_data = oracle.get_meeting_data();

        let mut contract = self.contract.lock().await;
        let resolution = contract.resolve_with_report(oracle_data.clone())?;
        info!(outcome = ?resolution.outcome, scenario = %oracle.scenario(), "resolve request settled");

        Ok(ResolveResult {
            oracle_data,
            narration: resolution.narration,
            state: contract.get_state(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContractStatus;
    use std::sync::Arc;

    fn service() -> LessonService {
        LessonService::from_config(&AppConfig::default())
    }

    #[tokio::test]
    async fn resolve_uses_scenario_override_and_keeps_it() {
        let service = service();
        service.fund_lesson(30.0, "Lesson").await.unwrap();

        let result = service.resolve(Some("teacher_no_show")).await.unwrap();
        assert_eq!(result.narration, "Teacher No-Show: Student refunded.");
        assert_eq!(result.state.status, ContractStatus::Refunded);
        assert_eq!(result.oracle_data.teacher_duration, 0);
        assert_eq!(service.scenario().await, "teacher_no_show");
    }

    #[tokio::test]
    async fn resolve_without_funding_is_rejected_but_keeps_scenario() {
        let service = service();

        let err = service.resolve(Some("student_no_show")).await.unwrap_err();
        assert_eq!(err, ContractError::NotFunded);
        assert_eq!(service.scenario().await, "student_no_show");
        assert!(service.state().await.last_oracle_data.is_none());
    }

    #[tokio::test]
    async fn concurrent_funding_funds_exactly_once() {
        let service = Arc::new(service());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.fund_lesson(10.0, "Race").await })
            })
            .collect();

        let mut funded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => funded += 1,
                Err(err) => assert_eq!(err, ContractError::AlreadyFunded),
            }
        }

        assert_eq!(funded, 1);
        assert_eq!(service.state().await.balances.contract, 10.0);
    }
}
