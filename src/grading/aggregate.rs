//! Per-course assembly of grade records.

use serde_json::Value;

use crate::grading::scale::resolve_letter_grade;
use crate::grading::types::{
    Course, Enrollment, GradeRecord, GradingPeriod, ScaleTier, StudentProfile,
};

/// Builds the output record for one course.
///
/// Returns `None` when the course has no selected grading period or no
/// enrollment for it. Only the first enrollment is used.
pub fn build_record(
    course: &Course,
    selected_period: Option<&GradingPeriod>,
    enrollments: &[Enrollment],
    student: &StudentProfile,
    scale: &[ScaleTier],
) -> Option<GradeRecord> {
    selected_period?;
    let enrollment = enrollments.first()?;

    let score = enrollment.current_score();

    Some(GradeRecord {
        student_name: student.name.clone(),
        student_id: student.id.clone(),
        course_name: course.name.clone(),
        course_id: course.id.clone(),
        current_score: format_score(score),
        current_grade: resolve_letter_grade(Some(score), scale),
        last_activity: enrollment.last_activity_at.clone(),
    })
}

/// Renders a raw score with a `%` suffix.
///
/// Whole numbers drop their fractional part and strings pass through. A
/// missing score renders as `null%`.
pub fn format_score(score: &Value) -> String {
    let raw = match score {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    format!("{raw}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::types::{CanvasId, Grades};
    use serde_json::json;

    fn scale() -> Vec<ScaleTier> {
        vec![ScaleTier::new(90.0, "A"), ScaleTier::new(80.0, "B")]
    }

    fn course() -> Course {
        Course {
            id: 10.into(),
            name: Some("Math".into()),
        }
    }

    fn student() -> StudentProfile {
        StudentProfile {
            id: 1.into(),
            name: Some("Alice".into()),
        }
    }

    fn period() -> GradingPeriod {
        GradingPeriod {
            id: 101.into(),
            title: "Term 2".into(),
            end_date: None,
        }
    }

    fn enrollment(score: Value, activity: Option<&str>) -> Enrollment {
        Enrollment {
            grades: Some(Grades {
                current_score: score,
            }),
            last_activity_at: activity.map(String::from),
        }
    }

    #[test]
    fn test_no_period_skips_course() {
        let enrollments = vec![enrollment(json!(92), None)];
        assert!(build_record(&course(), None, &enrollments, &student(), &scale()).is_none());
    }

    #[test]
    fn test_no_enrollment_skips_course() {
        let gp = period();
        assert!(build_record(&course(), Some(&gp), &[], &student(), &scale()).is_none());
    }

    #[test]
    fn test_builds_record_from_first_enrollment() {
        let gp = period();
        let enrollments = vec![
            enrollment(json!(92), Some("2024-03-05")),
            enrollment(json!(50), Some("2024-01-01")),
        ];
        let record = build_record(&course(), Some(&gp), &enrollments, &student(), &scale()).unwrap();

        assert_eq!(record.student_name.as_deref(), Some("Alice"));
        assert_eq!(record.student_id, CanvasId::Num(1));
        assert_eq!(record.course_name.as_deref(), Some("Math"));
        assert_eq!(record.course_id, CanvasId::Num(10));
        assert_eq!(record.current_score, "92%");
        assert_eq!(record.current_grade, "A");
        assert_eq!(record.last_activity.as_deref(), Some("2024-03-05"));
    }

    // Absent scores render as the literal "null%".
    #[test]
    fn test_missing_score_renders_null_percent() {
        let gp = period();
        let enrollments = vec![Enrollment::default()];
        let record = build_record(&course(), Some(&gp), &enrollments, &student(), &scale()).unwrap();

        assert_eq!(record.current_score, "null%");
        assert_eq!(record.current_grade, "N/A");
        assert!(record.last_activity.is_none());
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(&json!(92)), "92%");
        assert_eq!(format_score(&json!(92.0)), "92%");
        assert_eq!(format_score(&json!(92.5)), "92.5%");
        assert_eq!(format_score(&json!("88")), "88%");
        assert_eq!(format_score(&Value::Null), "null%");
    }
}
