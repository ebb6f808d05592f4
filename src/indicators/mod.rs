pub mod error;

pub mod momentum;
pub mod volatility;

pub use error::IndicatorError;
pub use momentum::*;
pub use volatility::*;
