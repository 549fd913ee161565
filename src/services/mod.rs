//! Business logic services for the lesson escrow server

pub mod lesson_service;
pub mod oracle_service;

pub use lesson_service::{LessonService, ResolveResult};
pub use oracle_service::{Oracle, Scenario};
