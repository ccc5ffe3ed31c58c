pub mod config;
pub mod error;
pub mod fetch;
pub mod grading;
pub mod infra;
pub mod output;
pub mod pipeline;
pub mod services;

pub use config::GradesConfig;
pub use error::GradesError;
pub use pipeline::{GradePipeline, fetch_grades};
