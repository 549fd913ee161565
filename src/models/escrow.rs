use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::contracts::{FeeMode, ResolutionPolicy};
use crate::models::oracle::AttendanceReport;

/// Simulated wallet balances, in mock USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalletSet {
    pub student: f64,
    pub teacher: f64,
    pub contract: f64,
    pub platform: f64,
}

impl WalletSet {
    /// Starting balances: only the student holds funds
    pub fn starting(student_balance: f64) -> Self {
        Self {
            student: student_balance,
            teacher: 0.0,
            contract: 0.0,
            platform: 0.0,
        }
    }

    /// Sum across all four accounts
    pub fn total(&self) -> f64 {
        self.student + self.teacher + self.contract + self.platform
    }
}

/// Contract lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractStatus {
    Created,
    Funded,
    Completed,
    Refunded,
}

impl ContractStatus {
    /// A settled lesson may be followed by a new one
    pub fn is_settled(&self) -> bool {
        matches!(self, ContractStatus::Completed | ContractStatus::Refunded)
    }
}

/// Append-only narration entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub tx_hash: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Read-only snapshot of the contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractState {
    pub balances: WalletSet,
    pub status: ContractStatus,
    pub logs: Vec<LogEntry>,
    pub lesson_price: f64,
    pub lesson_title: Option<String>,
    pub last_oracle_data: Option<AttendanceReport>,
    pub last_outcome: Option<String>,
    /// Transaction fees that left the wallet set (always 0 in collect mode)
    pub burned_fees: f64,
    pub fee_mode: FeeMode,
    pub resolution_policy: ResolutionPolicy,
}
