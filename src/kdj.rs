use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, Timestamp,
    error::{Error, Result},
    ewma::Ewma,
    high_low_window::HighLowWindow,
};

const DEFAULT_LENGTH: NonZero<usize> = NonZero::new(9).unwrap();
const DEFAULT_K_SMOOTHING: NonZero<usize> = NonZero::new(3).unwrap();
const DEFAULT_D_SMOOTHING: NonZero<usize> = NonZero::new(3).unwrap();

/// Configuration for the KDJ ([`Kdj`]) oscillator.
///
/// Three periods, in the usual `KDJ(N, M1, M2)` notation:
///
/// - `length` (`N`): lookback window for the highest high and lowest low.
/// - `k_smoothing` (`M1`): K line smoothing, `α = 1 / M1`.
/// - `d_smoothing` (`M2`): D line smoothing, `α = 1 / M2`.
///
/// All three are non-zero by construction. [`Default`] is `KDJ(9, 3, 3)`.
///
/// # Example
///
/// ```
/// use kdj_ta::{IndicatorConfig, IndicatorConfigBuilder, KdjConfig};
/// use std::num::NonZero;
///
/// let config = KdjConfig::builder()
///     .length(NonZero::new(14).unwrap())
///     .k_smoothing(NonZero::new(5).unwrap())
///     .build();
///
/// assert_eq!(config.length(), 14);
/// assert_eq!(config.k_smoothing(), 5);
/// assert_eq!(config.d_smoothing(), 3);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct KdjConfig {
    length: usize,
    k_smoothing: usize,
    d_smoothing: usize,
}

impl IndicatorConfig for KdjConfig {
    type Builder = KdjConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        KdjConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl KdjConfig {
    /// Creates a config from raw periods.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any period is zero.
    pub fn new(length: usize, k_smoothing: usize, d_smoothing: usize) -> Result<Self> {
        let length = non_zero("N", length, "window length must be at least 1")?;
        let k_smoothing = non_zero("M1", k_smoothing, "smoothing period must be at least 1")?;
        let d_smoothing = non_zero("M2", d_smoothing, "smoothing period must be at least 1")?;

        Ok(Self::builder()
            .length(length)
            .k_smoothing(k_smoothing)
            .d_smoothing(d_smoothing)
            .build())
    }

    /// K line smoothing period (`M1`).
    #[inline]
    #[must_use]
    pub fn k_smoothing(&self) -> usize {
        self.k_smoothing
    }

    /// D line smoothing period (`M2`).
    #[inline]
    #[must_use]
    pub fn d_smoothing(&self) -> usize {
        self.d_smoothing
    }
}

impl Default for KdjConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for KdjConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KdjConfig({}, {}, {})",
            self.length, self.k_smoothing, self.d_smoothing
        )
    }
}

fn non_zero(name: &'static str, value: usize, reason: &'static str) -> Result<NonZero<usize>> {
    NonZero::new(value).ok_or(Error::InvalidParameter {
        name,
        value,
        reason,
    })
}

/// Builder for [`KdjConfig`].
///
/// Defaults: length = 9, `k_smoothing` = 3, `d_smoothing` = 3.
pub struct KdjConfigBuilder {
    length: NonZero<usize>,
    k_smoothing: NonZero<usize>,
    d_smoothing: NonZero<usize>,
}

impl KdjConfigBuilder {
    fn new() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            k_smoothing: DEFAULT_K_SMOOTHING,
            d_smoothing: DEFAULT_D_SMOOTHING,
        }
    }

    /// Sets the K line smoothing period (`M1`).
    #[inline]
    #[must_use]
    pub fn k_smoothing(mut self, period: NonZero<usize>) -> Self {
        self.k_smoothing = period;
        self
    }

    /// Sets the D line smoothing period (`M2`).
    #[inline]
    #[must_use]
    pub fn d_smoothing(mut self, period: NonZero<usize>) -> Self {
        self.d_smoothing = period;
        self
    }
}

impl IndicatorConfigBuilder<KdjConfig> for KdjConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length;
        self
    }

    #[inline]
    fn build(self) -> KdjConfig {
        KdjConfig {
            length: self.length.get(),
            k_smoothing: self.k_smoothing.get(),
            d_smoothing: self.d_smoothing.get(),
        }
    }
}

/// KDJ output for a single bar.
///
/// ```text
/// K = EWMA(RSV, 1/M1)
/// D = EWMA(K, 1/M2)
/// J = 3K − 2D
/// ```
///
/// K and D normally lie in `[0, 100]`; J is unbounded. All three are NaN on a
/// bar whose window has zero price range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KdjValue {
    k: Price,
    d: Price,
    j: Price,
}

impl KdjValue {
    /// K line: smoothed RSV.
    #[inline]
    #[must_use]
    pub fn k(&self) -> Price {
        self.k
    }

    /// D line: smoothed K.
    #[inline]
    #[must_use]
    pub fn d(&self) -> Price {
        self.d
    }

    /// J line: `3K − 2D`.
    #[inline]
    #[must_use]
    pub fn j(&self) -> Price {
        self.j
    }

    /// `true` when the bar produced no usable value (zero price range).
    #[inline]
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.k.is_nan() || self.d.is_nan() || self.j.is_nan()
    }
}

impl Display for KdjValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KDJ(k: {}, d: {}, j: {})", self.k, self.d, self.j)
    }
}

/// KDJ stochastic oscillator.
///
/// For each bar the raw stochastic value is taken over the trailing window of
/// `length` bars:
///
/// ```text
/// RSV = (close − lowest low) / (highest high − lowest low) × 100
/// ```
///
/// and then smoothed twice with the `adjust = false` exponential recurrence
/// (`s = α × x + (1 − α) × s_prev`, seeded with the first value).
///
/// Values are produced from the first bar on: until `length` bars have been
/// seen the window covers the whole history. A bar whose window has
/// `highest high == lowest low` yields NaN for that bar only; the smoothing
/// resumes from the last finite K and D on the next bar.
///
/// Supports live repainting: feeding a bar with the same `trade_time`
/// recomputes the current value without advancing the window.
///
/// # Example
///
/// ```
/// use kdj_ta::{Kdj, KdjConfig};
/// # use kdj_ta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, f64, f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.2 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.1 }
/// #     fn close(&self) -> Price { self.2 }
/// #     fn trade_time(&self) -> Timestamp { self.3 }
/// # }
///
/// // N = 2, M1 = M2 = 1: K and D equal the raw RSV
/// let mut kdj = Kdj::new(KdjConfig::new(2, 1, 1).unwrap());
///
/// let first = kdj.compute(&Bar(3.0, 1.0, 2.0, 1)).unwrap();
/// assert_eq!(first.k(), 50.0);
/// assert_eq!(first.j(), 50.0);
///
/// // window [1, 2]: lowest 1, highest 4
/// let second = kdj.compute(&Bar(4.0, 2.0, 3.0, 2)).unwrap();
/// assert!((second.k() - 200.0 / 3.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct Kdj {
    config: KdjConfig,
    window: HighLowWindow,
    k: Ewma,
    d: Ewma,
    current: Option<KdjValue>,
    last_trade_time: Option<Timestamp>,
}

impl Kdj {
    #[inline]
    fn step(&mut self, ohlcv: &impl Ohlcv, advance: bool) -> KdjValue {
        if advance {
            self.window.push(ohlcv.high(), ohlcv.low());
        } else {
            self.window.replace(ohlcv.high(), ohlcv.low());
        }

        let lowest = self.window.lowest();
        let highest = self.window.highest();
        let rsv = (ohlcv.close() - lowest) / (highest - lowest) * 100.0;

        let k = self.k.update(rsv, advance);
        let d = self.d.update(k, advance);
        let value = KdjValue {
            k,
            d,
            j: 3.0 * k - 2.0 * d,
        };
        self.current = Some(value);

        value
    }
}

impl Indicator for Kdj {
    type Config = KdjConfig;
    type Output = KdjValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            window: HighLowWindow::new(config.length),
            k: Ewma::new(config.k_smoothing),
            d: Ewma::new(config.d_smoothing),
            current: None,
            last_trade_time: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<KdjValue> {
        debug_assert!(
            self.last_trade_time.is_none_or(|t| t <= ohlcv.trade_time()),
            "trade_time must be non-decreasing: last={}, got={}",
            self.last_trade_time.unwrap_or(0),
            ohlcv.trade_time(),
        );

        let is_next_bar = self.last_trade_time.is_none_or(|t| t < ohlcv.trade_time());
        self.last_trade_time = Some(ohlcv.trade_time());

        Some(self.step(ohlcv, is_next_bar))
    }

    #[inline]
    fn value(&self) -> Option<KdjValue> {
        self.current
    }
}

impl Display for Kdj {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KDJ({}, {}, {})",
            self.config.length, self.config.k_smoothing, self.config.d_smoothing
        )
    }
}

/// Computes KDJ over a whole series, one [`KdjValue`] per bar.
///
/// `series` must already be ordered by trade time; every element is treated
/// as its own bar regardless of its `trade_time`. An empty series yields an
/// empty result.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `n`, `m1` or `m2` is zero.
///
/// # Example
///
/// ```
/// use kdj_ta::{PriceBar, compute_kdj};
///
/// let bars = [
///     PriceBar::new(1, 2.0, 3.0, 1.0, 2.0),
///     PriceBar::new(2, 3.0, 4.0, 2.0, 3.0),
/// ];
/// let rows = compute_kdj(&bars, 9, 3, 3)?;
///
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].k(), 50.0);
///
/// assert!(compute_kdj(&bars, 9, 0, 3).is_err());
/// # Ok::<(), kdj_ta::Error>(())
/// ```
pub fn compute_kdj<B: Ohlcv>(
    series: &[B],
    n: usize,
    m1: usize,
    m2: usize,
) -> Result<Vec<KdjValue>> {
    let config = KdjConfig::new(n, m1, m2)?;

    Ok(compute_kdj_with(series, config))
}

/// Computes KDJ over a whole series with a prepared [`KdjConfig`].
///
/// Same as [`compute_kdj`], infallible since the config cannot hold zero
/// periods.
#[must_use]
pub fn compute_kdj_with<B: Ohlcv>(series: &[B], config: KdjConfig) -> Vec<KdjValue> {
    let mut kdj = Kdj::new(config);

    series.iter().map(|bar| kdj.step(bar, true)).collect()
}
