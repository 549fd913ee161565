//! API handlers for the lesson escrow server

pub mod extract;
pub mod lesson;
pub mod oracle;

pub use lesson::{fund_lesson, get_state, reset, resolve_lesson, topup_student};
pub use oracle::{get_scenario, set_scenario};

pub async fn root() -> &'static str {
    "Lesson Escrow Simulator API Server"
}

pub async fn health_check() -> &'static str {
    "OK"
}
