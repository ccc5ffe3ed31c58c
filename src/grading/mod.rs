//! Grade resolution: scale lookup, grading-period selection and per-course
//! record assembly.

pub mod aggregate;
pub mod period;
pub mod scale;
pub mod types;

pub use aggregate::build_record;
pub use period::select_period;
pub use scale::{letter_for, resolve_letter_grade};
pub use types::{
    CanvasId, Course, Enrollment, GradeRecord, GradingPeriod, ScaleTier, StudentProfile,
};
