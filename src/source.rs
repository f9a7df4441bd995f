//! Fallible boundary for obtaining time-ordered bars.
//!
//! A [`BarSource`] returns one trading day of bars for a stock code at a
//! given [`Frequency`]. Sources may return bars in any order; use
//! [`fetch_sorted`] to get them ascending by trade time, ready for
//! [`compute_kdj`](crate::compute_kdj).

use std::{
    fmt::Display,
    fs::File,
    io,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::{PriceBar, bar::sort_by_trade_time, error::SourceError};

const TRADE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Bar interval.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum Frequency {
    /// One-minute bars.
    Min1,
    /// Five-minute bars.
    #[default]
    Min5,
    /// Fifteen-minute bars.
    Min15,
    /// Thirty-minute bars.
    Min30,
    /// Sixty-minute bars.
    Min60,
}

impl Frequency {
    /// Bar length in minutes.
    #[must_use]
    pub fn minutes(self) -> u32 {
        match self {
            Self::Min1 => 1,
            Self::Min5 => 5,
            Self::Min15 => 15,
            Self::Min30 => 30,
            Self::Min60 => 60,
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}min", self.minutes())
    }
}

impl FromStr for Frequency {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" | "1min" => Ok(Self::Min1),
            "5min" => Ok(Self::Min5),
            "15min" => Ok(Self::Min15),
            "30min" => Ok(Self::Min30),
            "60min" => Ok(Self::Min60),
            other => Err(SourceError::UnsupportedFrequency(other.to_string())),
        }
    }
}

/// What to fetch: one trading day of bars for one stock code.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct BarRequest {
    /// Exchange-qualified stock code, e.g. `000001.SZ`.
    pub ts_code: String,
    /// Bar interval.
    pub freq: Frequency,
    /// Trading day.
    pub trade_date: NaiveDate,
}

impl BarRequest {
    /// One-minute bars for `trade_date`, the granularity used for
    /// realtime quotes.
    #[must_use]
    pub fn realtime(ts_code: impl Into<String>, trade_date: NaiveDate) -> Self {
        Self::intraday(ts_code, trade_date, Frequency::Min1)
    }

    /// Intraday bars at `freq` for `trade_date`.
    #[must_use]
    pub fn intraday(ts_code: impl Into<String>, trade_date: NaiveDate, freq: Frequency) -> Self {
        Self {
            ts_code: ts_code.into(),
            freq,
            trade_date,
        }
    }
}

impl Display for BarRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.ts_code, self.freq, self.trade_date)
    }
}

/// A provider of price bars.
///
/// Implementations return bars in whatever order the backing store holds
/// them. Errors are returned, never logged and swallowed; logging is done
/// by [`fetch_sorted`].
pub trait BarSource {
    /// Fetches the bars matching `request`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the data is missing or cannot be read.
    fn fetch(&self, request: &BarRequest) -> Result<Vec<PriceBar>, SourceError>;
}

/// Fetches bars from `source` and sorts them ascending by trade time.
///
/// # Errors
///
/// Propagates the source's [`SourceError`] after logging it.
pub fn fetch_sorted<S>(source: &S, request: &BarRequest) -> Result<Vec<PriceBar>, SourceError>
where
    S: BarSource + ?Sized,
{
    match source.fetch(request) {
        Ok(mut bars) => {
            sort_by_trade_time(&mut bars);
            debug!(request = %request, bars = bars.len(), "fetched bars");
            Ok(bars)
        }
        Err(err) => {
            warn!(request = %request, error = %err, "failed to fetch bars");
            Err(err)
        }
    }
}

/// File-backed [`BarSource`].
///
/// Reads `{root}/{ts_code}_{freq}.csv`, e.g. `data/000001.SZ_5min.csv`.
/// Files use the vendor's minute-bar export layout:
///
/// ```text
/// ts_code,trade_time,open,close,high,low,vol,amount
/// 000001.SZ,2024-03-15 09:31:00,10.41,10.43,10.45,10.40,1235100,12866482.0
/// ```
///
/// Extra columns are ignored. Rows for other codes or other days are skipped.
///
/// # Example
///
/// ```no_run
/// use kdj_ta::{BarRequest, CsvBarSource, NaiveDate, compute_kdj, fetch_sorted};
///
/// let source = CsvBarSource::new("data");
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let bars = fetch_sorted(&source, &BarRequest::realtime("000001.SZ", date))?;
/// let rows = compute_kdj(&bars, 9, 3, 3)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct CsvBarSource {
    root: PathBuf,
}

impl CsvBarSource {
    /// Creates a source reading files under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the source reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding bars for `request`.
    #[must_use]
    pub fn path_for(&self, request: &BarRequest) -> PathBuf {
        self.root.join(format!("{}_{}.csv", request.ts_code, request.freq))
    }
}

impl BarSource for CsvBarSource {
    fn fetch(&self, request: &BarRequest) -> Result<Vec<PriceBar>, SourceError> {
        let path = self.path_for(request);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound { path });
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut bars = Vec::new();

        for record in reader.deserialize::<BarRecord>() {
            let record = record?;
            if record.ts_code != request.ts_code {
                trace!(ts_code = %record.ts_code, "skipping row for other code");
                continue;
            }

            let trade_time = parse_trade_time(&record.trade_time)?;
            if trade_time.date() != request.trade_date {
                trace!(trade_time = %record.trade_time, "skipping row for other day");
                continue;
            }

            bars.push(record.into_bar(trade_time)?);
        }

        Ok(bars)
    }
}

#[derive(Debug, Deserialize)]
struct BarRecord {
    ts_code: String,
    trade_time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    vol: f64,
}

impl BarRecord {
    fn into_bar(self, trade_time: NaiveDateTime) -> Result<PriceBar, SourceError> {
        let seconds = u64::try_from(trade_time.and_utc().timestamp()).map_err(|_| {
            SourceError::InvalidTradeTime {
                value: self.trade_time.clone(),
                source: None,
            }
        })?;

        let bar = PriceBar::new(seconds, self.open, self.high, self.low, self.close);

        Ok(bar.with_volume(self.vol))
    }
}

fn parse_trade_time(value: &str) -> Result<NaiveDateTime, SourceError> {
    NaiveDateTime::parse_from_str(value, TRADE_TIME_FORMAT).map_err(|err| {
        SourceError::InvalidTradeTime {
            value: value.to_string(),
            source: Some(err),
        }
    })
}
