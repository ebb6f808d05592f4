use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("insufficient data: need {required} closes, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}
