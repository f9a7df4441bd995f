//! KDJ stochastic oscillator for Rust.
//!
//! Two ways in:
//!
//! - [`compute_kdj`] takes a time-ordered slice of bars and returns one
//!   [`KdjValue`] per bar.
//! - [`Kdj`] is a streaming indicator fed one bar at a time, with live
//!   repainting of the in-progress bar.
//!
//! Both accept any type implementing [`Ohlcv`]. Bars can be obtained through
//! a [`BarSource`]; [`fetch_sorted`] returns them ordered by trade time.
//!
//! [`Kdj`] exposes [`new`](Kdj::new), [`compute`](Kdj::compute), and
//! [`value`](Kdj::value) as inherent methods, no trait import needed.
//! Import [`Indicator`] only for generic code.

mod bar;
mod error;
mod ewma;
mod high_low_window;
mod indicator;
mod kdj;
mod ohlcv;
mod source;

pub use crate::bar::{PriceBar, sort_by_trade_time};
pub use crate::error::{Error, Result, SourceError};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::ohlcv::{Ohlcv, Price, Timestamp};
pub use crate::source::{BarRequest, BarSource, CsvBarSource, Frequency, fetch_sorted};

pub use crate::kdj::{Kdj, KdjConfig, KdjConfigBuilder, KdjValue, compute_kdj, compute_kdj_with};

pub use chrono::NaiveDate;

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, kline: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, kline)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Kdj, KdjConfig, KdjValue);

#[cfg(test)]
mod test_util;
