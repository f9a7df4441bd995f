use crate::Price;
use std::collections::VecDeque;

/// Trailing window of `(high, low)` pairs with a shrinking start.
///
/// Holds at most `size` pairs. Until `size` bars have been pushed the window
/// covers the whole history, so extrema are defined from the first bar on.
#[derive(Clone, Debug)]
pub(crate) struct HighLowWindow {
    size: usize,
    window: VecDeque<(Price, Price)>,
}

impl HighLowWindow {
    pub fn new(size: usize) -> Self {
        debug_assert!(size > 0, "window size must be non-zero");

        Self {
            size,
            window: VecDeque::with_capacity(size),
        }
    }

    /// Appends a new bar, evicting the oldest one once the window is full.
    #[inline]
    pub fn push(&mut self, high: Price, low: Price) {
        if self.window.len() == self.size {
            self.window.pop_front();
        }
        self.window.push_back((high, low));
    }

    /// Overwrites the newest bar. Pushes when the window is empty.
    #[inline]
    pub fn replace(&mut self, high: Price, low: Price) {
        match self.window.back_mut() {
            Some(last) => *last = (high, low),
            None => self.window.push_back((high, low)),
        }
    }

    /// Highest high in the window, skipping NaN.
    ///
    /// NaN when the window is empty or holds only NaN highs.
    #[inline]
    pub fn highest(&self) -> Price {
        self.window
            .iter()
            .fold(f64::NAN, |acc, &(high, _)| acc.max(high))
    }

    /// Lowest low in the window, skipping NaN.
    ///
    /// NaN when the window is empty or holds only NaN lows.
    #[inline]
    pub fn lowest(&self) -> Price {
        self.window
            .iter()
            .fold(f64::NAN, |acc, &(_, low)| acc.min(low))
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.window.len()
    }
}
