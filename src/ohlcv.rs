/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar trade timestamp or sequence number.
///
/// Used for bar boundary detection. Must be non-decreasing
/// between consecutive calls to [`Indicator::compute`](crate::Indicator::compute).
pub type Timestamp = u64;

/// OHLCV bar data used as input to the KDJ engine.
///
/// Implement this on your own kline/candle type to avoid per-tick
/// conversion. Both [`compute_kdj`](crate::compute_kdj) and
/// [`Kdj`](crate::Kdj) accept `&impl Ohlcv` and read only
/// [`high`](Ohlcv::high), [`low`](Ohlcv::low) and [`close`](Ohlcv::close).
///
/// # Bar boundaries
///
/// The streaming indicator detects new bars by comparing
/// [`trade_time`](Ohlcv::trade_time) values: same timestamp updates
/// (repaints) the current bar, a new timestamp advances the window.
/// The batch function treats every element as its own bar.
///
/// # Example
///
/// ```
/// use kdj_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn trade_time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing (or latest) price of the bar.
    fn close(&self) -> Price;

    /// Bar trade timestamp or sequence number.
    ///
    /// Values must be non-decreasing between calls. Behaviour is undefined if
    /// `trade_time` decreases.
    fn trade_time(&self) -> Timestamp;

    /// Trade volume during the bar. Defaults to `0.0`.
    fn volume(&self) -> f64 {
        0.0
    }
}

