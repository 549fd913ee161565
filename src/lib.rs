//! Lesson Escrow Simulator Library
//!
//! A mock escrow contract holds a student's payment for a tutoring lesson and
//! settles it from simulated meeting-attendance data supplied by a mock
//! oracle. This library exports the core modules and the HTTP layer for the
//! server binary.

pub mod app_state;
pub mod config;
pub mod escrow;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
