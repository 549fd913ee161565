//! Simulated escrow contract for a single tutoring lesson
//!
//! The contract holds the student's payment between funding and resolution,
//! then either pays the teacher (minus platform and transaction fees) or
//! refunds the student (minus the transaction fee). Which way it goes is
//! decided by the configured [`ResolutionPolicy`](crate::config::ResolutionPolicy)
//! from oracle-reported attendance.

mod contract;
mod error;
pub mod policy;
mod tx;

pub use contract::{Resolution, SmartContract};
pub use error::ContractError;
pub use policy::{Attendance, Outcome, Settlement};
pub use tx::TxIdGenerator;
