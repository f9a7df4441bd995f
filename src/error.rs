//! Error types for the KDJ engine and the bar source boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned by the KDJ engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A window or smoothing parameter is out of range.
    ///
    /// Returned before any computation when `N`, `M1` or `M2` is zero.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the KDJ formula.
        name: &'static str,
        /// The rejected value.
        value: usize,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Convenience type alias for Results using the engine [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by a [`BarSource`](crate::BarSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// No data exists for the requested code and frequency.
    #[error("no bar data at {}", path.display())]
    NotFound {
        /// Location that was looked up.
        path: PathBuf,
    },

    /// Opening or reading the underlying data failed for a reason other than
    /// it being absent.
    #[error("failed to read bar data: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be decoded.
    #[error("malformed bar record: {0}")]
    Csv(#[from] csv::Error),

    /// A `trade_time` value is not in `%Y-%m-%d %H:%M:%S` form or lies
    /// before the Unix epoch.
    #[error("invalid trade_time {value:?}")]
    InvalidTradeTime {
        /// The raw value.
        value: String,
        /// Parser error, if parsing was what failed.
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// An unknown bar frequency was requested.
    #[error("unsupported frequency {0:?}, expected one of 1min, 5min, 15min, 30min, 60min")]
    UnsupportedFrequency(String),
}
