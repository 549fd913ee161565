use chrono::Utc;
use tracing::{info, warn};

use crate::config::contracts::{ContractSettings, FeeMode};
use crate::models::{AttendanceReport, ContractState, ContractStatus, LogEntry, WalletSet};

use super::error::{ensure_positive, ContractError};
use super::policy::{Attendance, Outcome, Settlement};
use super::tx::TxIdGenerator;

/// Result of settling a funded lesson
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub narration: String,
    pub tx_hash: String,
}

/// In-memory escrow holding the funds for a single lesson
#[derive(Debug)]
pub struct SmartContract {
    settings: ContractSettings,
    balances: WalletSet,
    status: ContractStatus,
    lesson_price: f64,
    lesson_title: Option<String>,
    logs: Vec<LogEntry>,
    last_oracle_data: Option<AttendanceReport>,
    last_outcome: Option<String>,
    burned_fees: f64,
    tx_ids: TxIdGenerator,
}

impl Default for SmartContract {
    fn default() -> Self {
        Self::new(ContractSettings::default())
    }
}

impl SmartContract {
    pub fn new(settings: ContractSettings) -> Self {
        Self {
            balances: WalletSet::starting(settings.starting_student_balance),
            status: ContractStatus::Created,
            lesson_price: settings.default_lesson_price,
            lesson_title: None,
            logs: Vec::new(),
            last_oracle_data: None,
            last_outcome: None,
            burned_fees: 0.0,
            tx_ids: TxIdGenerator::new(),
            settings,
        }
    }

    /// Restore the starting balances and forget every lesson.
    ///
    /// The transaction id sequence keeps counting so ids stay unique.
    pub fn reset(&mut self) {
        self.balances = WalletSet::starting(self.settings.starting_student_balance);
        self.status = ContractStatus::Created;
        self.lesson_price = self.settings.default_lesson_price;
        self.lesson_title = None;
        self.logs.clear();
        self.last_oracle_data = None;
        self.last_outcome = None;
        self.burned_fees = 0.0;
        info!("contract reset to starting balances");
    }

    pub fn topup_student(&mut self, amount: f64) -> Result<String, ContractError> {
        let amount = ensure_positive("amount", amount).map_err(|e| {
            warn!(amount, "rejected student top-up");
            e
        })?;

        self.balances.student += amount;
        self.log(format!("Student wallet topped up by {} USD.", amount), None);
        info!(amount, student = self.balances.student, "student wallet topped up");

        Ok("Top-up successful.".to_string())
    }

    pub fn fund_lesson(&mut self, price: f64, lesson_title: &str) -> Result<String, ContractError> {
        if self.status == ContractStatus::Funded {
            warn!("fund rejected: contract already funded");
            return Err(ContractError::AlreadyFunded);
        }
        let price = ensure_positive("price", price)?;

        let tx_fee = price * self.settings.tx_fee_percent;
        let total_deduction = price + tx_fee;
        if self.balances.student < total_deduction {
            warn!(
                needed = total_deduction,
                available = self.balances.student,
                "fund rejected: insufficient student balance"
            );
            return Err(ContractError::InsufficientFunds {
                needed: total_deduction,
            });
        }

        // Every guard has passed; a settled lesson starts a new cycle here
        if self.status.is_settled() {
            self.status = ContractStatus::Created;
            self.last_oracle_data = None;
            self.last_outcome = None;
        }

        self.balances.student -= total_deduction;
        self.balances.contract += price;
        self.charge_tx_fee(tx_fee);
        self.lesson_price = price;
        self.lesson_title = Some(lesson_title.to_string());
        self.status = ContractStatus::Funded;

        let tx_hash = self.tx_ids.next_id("fund");
        self.log(
            format!(
                "Student funded '{}' ({} USD + {:.2} fee). Funds locked in Escrow.",
                lesson_title, price, tx_fee
            ),
            Some(tx_hash.clone()),
        );
        info!(price, tx_fee, %tx_hash, lesson = lesson_title, "lesson funded");

        Ok("Lesson funded successfully.".to_string())
    }

    /// Settle the funded lesson from attendance minutes.
    ///
    /// `oracle_data` is kept as the last consumed report whatever the outcome.
    pub fn resolve_lesson(
        &mut self,
        teacher_duration: f64,
        student_duration: f64,
        oracle_data: AttendanceReport,
        required_duration: f64,
    ) -> Result<Resolution, ContractError> {
        if self.status != ContractStatus::Funded {
            warn!(status = ?self.status, "resolve rejected: contract not funded");
            return Err(ContractError::NotFunded);
        }

        let attendance = Attendance {
            teacher_minutes: teacher_duration,
            student_minutes: student_duration,
            student_override: oracle_data.overridden_by_student(),
        };
        self.last_oracle_data = Some(oracle_data);

        let outcome = self
            .settings
            .resolution_policy
            .decide(&attendance, required_duration);
        let narration = outcome.narration().to_string();
        self.last_outcome = Some(narration.clone());

        let tx_hash = self.tx_ids.next_id("resolve");
        let message = match outcome.settlement() {
            Settlement::PayoutTeacher => self.payout_teacher(&narration),
            Settlement::RefundStudent => self.refund_student(&narration),
        };
        self.log(message, Some(tx_hash.clone()));
        info!(
            ?outcome,
            teacher_duration,
            student_duration,
            status = ?self.status,
            %tx_hash,
            "lesson resolved"
        );

        Ok(Resolution {
            outcome,
            narration,
            tx_hash,
        })
    }

    /// Resolve with the report's own durations and the configured lesson length
    pub fn resolve_with_report(
        &mut self,
        report: AttendanceReport,
    ) -> Result<Resolution, ContractError> {
        let required = f64::from(self.settings.required_duration_minutes);
        self.resolve_lesson(
            f64::from(report.teacher_duration),
            f64::from(report.student_duration),
            report,
            required,
        )
    }

    pub fn get_state(&self) -> ContractState {
        ContractState {
            balances: self.balances,
            status: self.status,
            logs: self.logs.clone(),
            lesson_price: self.lesson_price,
            lesson_title: self.lesson_title.clone(),
            last_oracle_data: self.last_oracle_data.clone(),
            last_outcome: self.last_outcome.clone(),
            burned_fees: self.burned_fees,
            fee_mode: self.settings.fee_mode,
            resolution_policy: self.settings.resolution_policy,
        }
    }

    pub fn balances(&self) -> WalletSet {
        self.balances
    }

    pub fn status(&self) -> ContractStatus {
        self.status
    }

    pub fn burned_fees(&self) -> f64 {
        self.burned_fees
    }

    pub fn settings(&self) -> &ContractSettings {
        &self.settings
    }

    fn payout_teacher(&mut self, narration: &str) -> String {
        let escrow = self.balances.contract;
        let platform_fee = escrow * self.settings.platform_fee_percent;
        let gross_payout = escrow - platform_fee;
        let tx_fee = gross_payout * self.settings.tx_fee_percent;
        let net_payout = gross_payout - tx_fee;

        self.balances.contract = 0.0;
        self.balances.teacher += net_payout;
        self.balances.platform += platform_fee;
        self.charge_tx_fee(tx_fee);
        self.status = ContractStatus::Completed;

        format!(
            "Oracle Resolution: {} -> Payout {:.2} to Teacher (Fees: {:.2} Platform, {:.2} Tx).",
            narration, net_payout, platform_fee, tx_fee
        )
    }

    fn refund_student(&mut self, narration: &str) -> String {
        let escrow = self.balances.contract;
        let tx_fee = escrow * self.settings.tx_fee_percent;
        let net_refund = escrow - tx_fee;

        self.balances.contract = 0.0;
        self.balances.student += net_refund;
        self.charge_tx_fee(tx_fee);
        self.status = ContractStatus::Refunded;

        format!(
            "Oracle Resolution: {} -> Refund {:.2} to Student (Tx Fee: {:.2}).",
            narration, net_refund, tx_fee
        )
    }

    /// The fee has already been taken from a balance
    fn charge_tx_fee(&mut self, fee: f64) {
        match self.settings.fee_mode {
            FeeMode::Burn => self.burned_fees += fee,
            FeeMode::Collect => self.balances.platform += fee,
        }
    }

    fn log(&mut self, message: String, tx_hash: Option<String>) {
        self.logs.push(LogEntry {
            message,
            tx_hash,
            recorded_at: Utc::now(),
        });
    }
}
