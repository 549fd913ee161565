//! Settlement decisions from attendance data

use serde::{Deserialize, Serialize};

use crate::config::contracts::ResolutionPolicy;

/// Classified result of a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HappyPath,
    StudentNoShow,
    TeacherNoShow,
    Dispute,
    StudentOverride,
}

/// Which way the escrow balance moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    PayoutTeacher,
    RefundStudent,
}

impl Outcome {
    pub fn settlement(&self) -> Settlement {
        match self {
            Outcome::HappyPath | Outcome::StudentNoShow | Outcome::StudentOverride => {
                Settlement::PayoutTeacher
            }
            Outcome::TeacherNoShow | Outcome::Dispute => Settlement::RefundStudent,
        }
    }

    pub fn narration(&self) -> &'static str {
        match self {
            Outcome::HappyPath => "Happy Path: Lesson Completed Successfully.",
            Outcome::StudentNoShow => "Student No-Show: Teacher compensated.",
            Outcome::TeacherNoShow => "Teacher No-Show: Student refunded.",
            Outcome::Dispute => {
                "Dispute/Irregular: Manual intervention required. (Refunding for MVP)"
            }
            Outcome::StudentOverride => {
                "Student Override: Student confirmed the lesson. Teacher paid."
            }
        }
    }
}

/// Attendance evidence fed into a policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attendance {
    pub teacher_minutes: f64,
    pub student_minutes: f64,
    pub student_override: bool,
}

impl ResolutionPolicy {
    /// Classify attendance against the required lesson length in minutes
    pub fn decide(&self, attendance: &Attendance, required_minutes: f64) -> Outcome {
        match self {
            ResolutionPolicy::ThresholdBands => threshold_bands(attendance, required_minutes),
            ResolutionPolicy::StudentOverride => student_override(attendance, required_minutes),
        }
    }
}

fn threshold_bands(attendance: &Attendance, required_minutes: f64) -> Outcome {
    let threshold = required_minutes * 0.9;
    let min_threshold = required_minutes * 0.1;
    let teacher = attendance.teacher_minutes;
    let student = attendance.student_minutes;

    if teacher >= threshold && student >= threshold {
        Outcome::HappyPath
    } else if teacher >= threshold && student < min_threshold {
        Outcome::StudentNoShow
    } else if teacher < min_threshold && student >= threshold {
        Outcome::TeacherNoShow
    } else {
        Outcome::Dispute
    }
}

fn student_override(attendance: &Attendance, required_minutes: f64) -> Outcome {
    let min_threshold = required_minutes * 0.95;

    if attendance.student_override {
        Outcome::StudentOverride
    } else if attendance.teacher_minutes < min_threshold {
        Outcome::TeacherNoShow
    } else if attendance.student_minutes >= min_threshold {
        Outcome::HappyPath
    } else {
        // Teacher showed up; wording only
        Outcome::StudentNoShow
    }
}
