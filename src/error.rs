use chrono::NaiveDate;
use thiserror::Error;

/// A value that does not fit the feature schema. Fatal to the request:
/// nothing with a schema error ever reaches the predictor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("unknown {field} value {value:?}")]
    UnknownCategory { field: &'static str, value: String },
    #[error("{field} code {value} is outside its allowed set {allowed}")]
    CodeOutOfRange {
        field: &'static str,
        value: i32,
        allowed: &'static str,
    },
    #[error("no employee with id {0}")]
    UnknownEmployee(i64),
    #[error("feature column {0:?} missing from encoded features")]
    MissingColumn(&'static str),
    #[error("encoded features carry {actual} columns, schema expects {expected}")]
    UnexpectedColumns { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemporalError {
    #[error("{field} {date} is in the future (today is {today})")]
    FutureDate {
        field: &'static str,
        date: NaiveDate,
        today: NaiveDate,
    },
}

/// Failure of the opaque classifier boundary. Not retried automatically.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictorError {
    #[error("model expects {expected} features, received {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("model produced probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}

/// Any core failure on the submit path. All variants abort the single
/// request; the surrounding CLI decides whether to prompt again.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Temporal(#[from] TemporalError),
    #[error(transparent)]
    Predictor(#[from] PredictorError),
}
