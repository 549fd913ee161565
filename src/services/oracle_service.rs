use std::fmt;

use rand::Rng;
use serde_json::json;
use tracing::{debug, info};

use crate::models::oracle::{AttendanceReport, Participant};

pub const DEFAULT_SCENARIO: &str = "happy_path";

const MEETING_CODE: &str = "abc-defg-hij";
const TEACHER_EMAIL: &str = "teacher@uni.com";
const STUDENT_EMAIL: &str = "student@uni.com";
const LESSON_MINUTES: u32 = 60;

/// Typed view of a scenario key. Unknown keys are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scenario {
    HappyPath,
    StudentNoShow,
    TeacherNoShow,
    Random,
    StudentOverride,
    Unknown(String),
}

impl Scenario {
    pub fn parse(key: &str) -> Self {
        match key {
            "happy_path" => Scenario::HappyPath,
            "student_no_show" => Scenario::StudentNoShow,
            "teacher_no_show" => Scenario::TeacherNoShow,
            "random" => Scenario::Random,
            "student_override" => Scenario::StudentOverride,
            other => Scenario::Unknown(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Scenario::HappyPath => "happy_path",
            Scenario::StudentNoShow => "student_no_show",
            Scenario::TeacherNoShow => "teacher_no_show",
            Scenario::Random => "random",
            Scenario::StudentOverride => "student_override",
            Scenario::Unknown(key) => key,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Simulated meeting-attendance oracle.
///
/// Stands in for a video-conferencing API: it fabricates a report for the
/// selected scenario and never makes a network call.
#[derive(Debug, Clone)]
pub struct Oracle {
    scenario: Scenario,
}

impl Default for Oracle {
    fn default() -> Self {
        Self::new(DEFAULT_SCENARIO)
    }
}

impl Oracle {
    pub fn new(scenario: &str) -> Self {
        Self {
            scenario: Scenario::parse(scenario),
        }
    }

    /// No validation: an unknown key yields the empty report
    pub fn set_scenario(&mut self, key: &str) {
        self.scenario = Scenario::parse(key);
        info!(scenario = %self.scenario, "oracle scenario selected");
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn get_meeting_data(&self) -> AttendanceReport {
        self.get_meeting_data_with(&mut rand::thread_rng())
    }

    pub fn get_meeting_data_with<R: Rng>(&self, rng: &mut R) -> AttendanceReport {
        let report = match &self.scenario {
            Scenario::HappyPath => attended(LESSON_MINUTES, LESSON_MINUTES),
            Scenario::StudentNoShow => attended(LESSON_MINUTES, 0),
            Scenario::TeacherNoShow => attended(0, LESSON_MINUTES),
            Scenario::Random => attended(
                rng.gen_range(0..=LESSON_MINUTES),
                rng.gen_range(0..=LESSON_MINUTES),
            ),
            Scenario::StudentOverride => AttendanceReport {
                student_override: Some(true),
                ..attended(LESSON_MINUTES / 2, LESSON_MINUTES / 2)
            },
            Scenario::Unknown(_) => AttendanceReport::empty(),
        };

        debug!(
            scenario = %self.scenario,
            teacher = report.teacher_duration,
            student = report.student_duration,
            "oracle report generated"
        );
        report
    }
}

/// Report with a meeting payload listing everyone who joined
fn attended(teacher_minutes: u32, student_minutes: u32) -> AttendanceReport {
    let participants: Vec<Participant> = [
        (TEACHER_EMAIL, teacher_minutes),
        (STUDENT_EMAIL, student_minutes),
    ]
    .into_iter()
    .filter(|(_, minutes)| *minutes > 0)
    .map(|(email, minutes)| Participant {
        email: email.to_string(),
        duration_seconds: minutes * 60,
    })
    .collect();

    AttendanceReport {
        teacher_duration: teacher_minutes,
        student_duration: student_minutes,
        student_override: None,
        raw_json: json!({
            "meetingCode": MEETING_CODE,
            "participants": participants,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn defaults_to_happy_path() {
        let oracle = Oracle::default();
        assert_eq!(oracle.scenario(), &Scenario::HappyPath);

        let report = oracle.get_meeting_data();
        assert_eq!(report.teacher_duration, 60);
        assert_eq!(report.student_duration, 60);
        assert_eq!(report.raw_json["meetingCode"], "abc-defg-hij");
        assert_eq!(report.raw_json["participants"].as_array().unwrap().len(), 2);
        assert_eq!(
            report.raw_json["participants"][0]["durationSeconds"],
            3600
        );
    }

    #[test]
    fn no_show_scenarios_drop_the_absent_participant() {
        let mut oracle = Oracle::default();

        oracle.set_scenario("student_no_show");
        let report = oracle.get_meeting_data();
        assert_eq!((report.teacher_duration, report.student_duration), (60, 0));
        let participants = report.raw_json["participants"].as_array().unwrap();
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0]["email"], "teacher@uni.com");

        oracle.set_scenario("teacher_no_show");
        let report = oracle.get_meeting_data();
        assert_eq!((report.teacher_duration, report.student_duration), (0, 60));
        assert_eq!(report.raw_json["participants"][0]["email"], "student@uni.com");
    }

    #[test]
    fn unknown_scenario_degrades_to_empty_report() {
        let mut oracle = Oracle::default();
        oracle.set_scenario("zoom_outage");

        assert_eq!(oracle.scenario().key(), "zoom_outage");
        let report = oracle.get_meeting_data();
        assert_eq!(report, AttendanceReport::empty());
        assert!(report.raw_json.as_object().unwrap().is_empty());
    }

    #[test]
    fn random_scenario_stays_in_bounds_and_varies() {
        let mut oracle = Oracle::default();
        oracle.set_scenario("random");
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let report = oracle.get_meeting_data_with(&mut rng);
            assert!(report.teacher_duration <= 60);
            assert!(report.student_duration <= 60);
            seen.insert((report.teacher_duration, report.student_duration));
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn override_scenario_sets_the_flag() {
        let oracle = Oracle::new("student_override");
        let report = oracle.get_meeting_data();

        assert!(report.overridden_by_student());
        assert_eq!(report.teacher_duration, 30);
    }

    #[test]
    fn scenario_keys_round_trip() {
        for key in [
            "happy_path",
            "student_no_show",
            "teacher_no_show",
            "random",
            "student_override",
            "anything",
        ] {
            assert_eq!(Scenario::parse(key).key(), key);
        }
    }
}
