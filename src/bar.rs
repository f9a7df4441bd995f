use crate::{Ohlcv, Price, Timestamp};

/// An owned OHLCV bar.
///
/// The record a [`BarSource`](crate::BarSource) produces. `trade_time` is
/// seconds since the Unix epoch (exchange local time, read as UTC).
///
/// `low <= close <= high` is expected but not checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub trade_time: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: f64,
}

impl PriceBar {
    /// Creates a bar with zero volume.
    #[must_use]
    pub fn new(trade_time: Timestamp, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            trade_time,
            open,
            high,
            low,
            close,
            volume: 0.0,
        }
    }

    /// Sets the traded volume.
    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }
}

impl Ohlcv for PriceBar {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    fn trade_time(&self) -> Timestamp {
        self.trade_time
    }

    #[inline]
    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Sorts bars ascending by `trade_time`.
///
/// Stable: bars sharing a timestamp keep their relative order.
pub fn sort_by_trade_time(bars: &mut [PriceBar]) {
    bars.sort_by_key(|bar| bar.trade_time);
}
