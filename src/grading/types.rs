//! Data types shared by the grade-resolution pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A Canvas object identifier.
///
/// Canvas returns integers, but some deployments stringify ids; both forms are
/// accepted and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanvasId {
    Num(u64),
    Str(String),
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasId::Num(n) => write!(f, "{n}"),
            CanvasId::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for CanvasId {
    fn from(n: u64) -> Self {
        CanvasId::Num(n)
    }
}

/// One threshold of the letter-grade scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleTier {
    #[serde(rename = "minpercent")]
    pub min_percent: f64,
    #[serde(rename = "lettergrade")]
    pub letter_grade: String,
}

impl ScaleTier {
    pub fn new(min_percent: f64, letter_grade: impl Into<String>) -> Self {
        Self {
            min_percent,
            letter_grade: letter_grade.into(),
        }
    }
}

/// The authenticated user, from `users/self`.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentProfile {
    pub id: CanvasId,
    #[serde(default)]
    pub name: Option<String>,
}

/// An entry of the active course list.
#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: CanvasId,
    #[serde(default)]
    pub name: Option<String>,
}

/// A named grading interval of a course.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradingPeriod {
    pub id: CanvasId,
    #[serde(default)]
    pub title: String,
    /// `None` when Canvas omits the date or sends something unparseable.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Score snapshot nested inside an enrollment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Grades {
    /// Kept as raw JSON: Canvas sends a number or `null`, and the output
    /// echoes whatever was sent.
    #[serde(default)]
    pub current_score: Value,
}

/// A user's enrollment in a course for one grading period.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Enrollment {
    #[serde(default)]
    pub grades: Option<Grades>,
    #[serde(default)]
    pub last_activity_at: Option<String>,
}

impl Enrollment {
    /// The raw `grades.current_score`, `Null` when either level is absent.
    pub fn current_score(&self) -> &Value {
        self.grades
            .as_ref()
            .map(|g| &g.current_score)
            .unwrap_or(&Value::Null)
    }
}

/// One course's resolved grade for the student.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    pub student_name: Option<String>,
    pub student_id: CanvasId,
    pub course_name: Option<String>,
    pub course_id: CanvasId,
    pub current_score: String,
    pub current_grade: String,
    pub last_activity: Option<String>,
}

/// Parses RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canvas_id_accepts_numbers_and_strings() {
        let n: CanvasId = serde_json::from_value(json!(42)).unwrap();
        let s: CanvasId = serde_json::from_value(json!("sis-42")).unwrap();
        assert_eq!(n, CanvasId::Num(42));
        assert_eq!(s, CanvasId::Str("sis-42".into()));
        assert_eq!(serde_json::to_value(&n).unwrap(), json!(42));
        assert_eq!(s.to_string(), "sis-42");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let full = parse_timestamp("2024-03-01T06:59:59Z").unwrap();
        let date_only = parse_timestamp("2024-03-01").unwrap();
        assert!(full > date_only);
        assert!(parse_timestamp("next tuesday").is_none());
    }

    #[test]
    fn test_grading_period_tolerates_bad_end_date() {
        let gp: GradingPeriod =
            serde_json::from_value(json!({"id": 1, "title": "Term 2", "end_date": 17})).unwrap();
        assert!(gp.end_date.is_none());

        let gp: GradingPeriod = serde_json::from_value(json!({"id": 2, "title": "Term 2"})).unwrap();
        assert!(gp.end_date.is_none());
    }

    #[test]
    fn test_enrollment_score_defaults_to_null() {
        let e: Enrollment = serde_json::from_value(json!({"last_activity_at": null})).unwrap();
        assert_eq!(e.current_score(), &Value::Null);

        let e: Enrollment =
            serde_json::from_value(json!({"grades": {"current_score": 88.5}})).unwrap();
        assert_eq!(e.current_score(), &json!(88.5));
    }

    #[test]
    fn test_grade_record_serializes_camel_case() {
        let record = GradeRecord {
            student_name: Some("Alice".into()),
            student_id: 1.into(),
            course_name: Some("Math".into()),
            course_id: 10.into(),
            current_score: "92%".into(),
            current_grade: "A".into(),
            last_activity: Some("2024-03-05".into()),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "studentName": "Alice",
                "studentId": 1,
                "courseName": "Math",
                "courseId": 10,
                "currentScore": "92%",
                "currentGrade": "A",
                "lastActivity": "2024-03-05"
            })
        );
    }
}
