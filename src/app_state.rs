//! Application state shared across handlers

use std::sync::Arc;

use crate::services::LessonService;

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub lesson_service: Arc<LessonService>,
}

impl AppState {
    pub fn new(lesson_service: Arc<LessonService>) -> Self {
        Self { lesson_service }
    }
}

impl FromRef<AppState> for Arc<LessonService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.lesson_service.clone()
    }
}
