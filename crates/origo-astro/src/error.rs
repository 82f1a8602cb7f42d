use thiserror::Error;

/// Errors raised while projecting longitudes into divisional charts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("ascendant longitude is unavailable; cannot generate chart")]
    MissingAscendant,
    #[error("no longitude available for body '{body}'")]
    MissingBody { body: String },
    #[error("unrecognized divisor {divisor}. Supported divisors: {supported:?}")]
    UnrecognizedDivisor { divisor: String, supported: Vec<u32> },
    #[error("chart has no ascendant entry; house positions cannot be derived")]
    FormattingFailure,
    #[error("sign index {index} is outside 1..=12")]
    InvalidSign { index: u8 },
}
