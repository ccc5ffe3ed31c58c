//! End-to-end grade retrieval for the authenticated student.
//!
//! The run is strictly sequential: profile, active courses, then for each
//! course its grading periods and, when a period matches the configured term,
//! the enrollment for that period. Any fatal error aborts the run and no
//! partial result is returned.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Instrument, debug, error, info, warn};

use crate::config::GradesConfig;
use crate::error::{GradesError, Result};
use crate::grading::{
    Course, Enrollment, GradeRecord, GradingPeriod, StudentProfile, build_record, select_period,
};
use crate::infra::canvas::CanvasHttpClient;
use crate::services::canvas_api::CanvasApi;

const INVALID_TOKEN_MESSAGE: &str = "Invalid access token.";

/// Drives one grade retrieval run against an injected [`CanvasApi`].
pub struct GradePipeline<'a, A: ?Sized> {
    api: &'a A,
    base_url: String,
    config: &'a GradesConfig,
}

impl<'a, A: CanvasApi + ?Sized> GradePipeline<'a, A> {
    /// `domain` is a bare host (`school.instructure.com`, served over https)
    /// or a full origin such as `http://localhost:8080`.
    pub fn new(api: &'a A, domain: &str, config: &'a GradesConfig) -> Self {
        Self {
            api,
            base_url: api_base_url(domain),
            config,
        }
    }

    /// Runs the whole pipeline, returning one record per graded course in
    /// course-list order.
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url, term = %self.config.grading_term))]
    pub async fn run(&self) -> Result<Vec<GradeRecord>> {
        self.collect()
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch grades"))
    }

    async fn collect(&self) -> Result<Vec<GradeRecord>> {
        let student = self.fetch_profile().await?;
        let courses = self.fetch_courses().await?;

        info!(
            student_id = %student.id,
            course_count = courses.len(),
            "Getting data"
        );

        let mut records = Vec::new();
        for course in &courses {
            let span = tracing::info_span!("course", course_id = %course.id);
            if let Some(record) = self.grade_course(course, &student).instrument(span).await? {
                records.push(record);
            }
        }

        info!(records = records.len(), "Grade retrieval complete");
        Ok(records)
    }

    async fn fetch_profile(&self) -> Result<StudentProfile> {
        let response = self.api.get(&self.url("users/self")).await?;
        let success = response.is_success();
        let status = response.status;
        let body = response.body;

        if body["errors"][0]["message"].as_str() == Some(INVALID_TOKEN_MESSAGE) {
            return Err(GradesError::Auth);
        }

        if !success || !has_identity(&body["id"]) {
            return Err(GradesError::Profile(format!("status {status}: {body}")));
        }

        serde_json::from_value(body).map_err(|e| GradesError::Profile(e.to_string()))
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>> {
        let response = self
            .api
            .get(&self.url("courses?enrollment_state=active"))
            .await?;

        match response.body {
            Value::Array(items) => Ok(decode_items(items)),
            other => Err(GradesError::CourseList(other.to_string())),
        }
    }

    async fn grade_course(
        &self,
        course: &Course,
        student: &StudentProfile,
    ) -> Result<Option<GradeRecord>> {
        let response = self
            .api
            .get(&self.url(&format!("courses/{}/grading_periods", course.id)))
            .await?;

        let periods: Vec<GradingPeriod> = match response.body {
            Value::Object(mut map) => match map.remove("grading_periods") {
                Some(Value::Array(items)) => decode_items(items),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        let Some(period) = select_period(&periods, &self.config.grading_term) else {
            debug!(
                candidates = periods.len(),
                "No grading period for term, skipping course"
            );
            return Ok(None);
        };

        info!(period_id = %period.id, title = %period.title, "Fetching enrollment for grading period");

        let response = self
            .api
            .get(&self.url(&format!(
                "courses/{}/enrollments?user_id={}&grading_period_id={}",
                course.id, student.id, period.id
            )))
            .await?;

        let enrollments: Vec<Enrollment> = match response.body {
            Value::Array(items) => items
                .into_iter()
                .map(|item| {
                    serde_json::from_value(item).unwrap_or_else(|e| {
                        warn!(error = %e, "Undecodable enrollment entry, treating as empty");
                        Enrollment::default()
                    })
                })
                .collect(),
            _ => Vec::new(),
        };

        let record = build_record(
            course,
            Some(period),
            &enrollments,
            student,
            &self.config.scale,
        );
        if record.is_none() {
            debug!("No enrollment data for grading period, skipping course");
        }
        Ok(record)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Fetches grades using the default reqwest transport with bearer auth.
pub async fn fetch_grades(
    token: &str,
    domain: &str,
    config: &GradesConfig,
) -> Result<Vec<GradeRecord>> {
    let api = CanvasHttpClient::with_token(token)
        .inspect_err(|e| error!(error = %e, "Failed to build Canvas client"))?;
    GradePipeline::new(&api, domain, config).run().await
}

fn api_base_url(domain: &str) -> String {
    let domain = domain.trim().trim_end_matches('/');
    if domain.starts_with("http://") || domain.starts_with("https://") {
        format!("{domain}/api/v1")
    } else {
        format!("https://{domain}/api/v1")
    }
}

/// A profile `id` counts only if it is a non-zero number or non-empty string.
fn has_identity(id: &Value) -> bool {
    match id {
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => false,
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable list entry");
                None
            }
        })
        .collect()
}
