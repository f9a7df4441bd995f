// src/test_util.rs

use crate::{Ohlcv, Price, Timestamp};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

#[derive(Clone, Copy, Debug)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub trade_time: u64,
}

impl Bar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            trade_time: 0,
        }
    }

    pub fn at(mut self, trade_time: u64) -> Self {
        self.trade_time = trade_time;
        self
    }
}

/// Convenience: bar with high, low and close at a timestamp (open equal to close).
pub fn hlc(high: f64, low: f64, close: f64, time: u64) -> Bar {
    Bar::new(close, high, low, close).at(time)
}

/// Builds a series from parallel `low`, `high`, `close` columns, one bar per
/// position with timestamps `1..`.
pub fn series(low: &[f64], high: &[f64], close: &[f64]) -> Vec<Bar> {
    assert_eq!(low.len(), high.len());
    assert_eq!(low.len(), close.len());

    (0..low.len())
        .map(|i| hlc(high[i], low[i], close[i], i as u64 + 1))
        .collect()
}

impl Ohlcv for Bar {
    fn open(&self) -> Price {
        self.open
    }
    fn high(&self) -> Price {
        self.high
    }
    fn low(&self) -> Price {
        self.low
    }
    fn close(&self) -> Price {
        self.close
    }
    fn trade_time(&self) -> Timestamp {
        self.trade_time
    }
}
