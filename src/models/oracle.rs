use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attendance data reported by the oracle, durations in minutes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReport {
    pub teacher_duration: u32,
    pub student_duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_override: Option<bool>,
    pub raw_json: Value, // Mimics the meeting API response body
}

impl AttendanceReport {
    /// Report with no attendance and an empty payload
    pub fn empty() -> Self {
        Self {
            teacher_duration: 0,
            student_duration: 0,
            student_override: None,
            raw_json: Value::Object(Default::default()),
        }
    }

    pub fn overridden_by_student(&self) -> bool {
        self.student_override == Some(true)
    }
}

/// Participant entry inside the simulated meeting payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub email: String,
    pub duration_seconds: u32,
}
