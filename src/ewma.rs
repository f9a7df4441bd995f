use crate::Price;

/// Exponential recurrence in the `adjust = false` form:
///
/// ```text
/// s[0] = x[0]
/// s[i] = α × x[i] + (1 − α) × s[i−1]
/// ```
///
/// with `α = 1 / period`. No renormalisation by cumulative weights.
///
/// `committed` is the smoothed value of the last closed step and is the only
/// state the recurrence reads. A NaN input makes that step NaN but is never
/// committed, so the next step blends against the last finite value. Until a
/// non-NaN input arrives there is nothing committed and the next input seeds
/// the recurrence.
#[derive(Clone, Debug)]
pub(crate) struct Ewma {
    alpha: f64,
    committed: Option<Price>,
    current: Option<Price>,
}

impl Ewma {
    pub fn new(period: usize) -> Self {
        debug_assert!(period > 0, "period must be non-zero");

        Self {
            #[allow(clippy::cast_precision_loss)]
            alpha: 1.0 / period as f64,
            committed: None,
            current: None,
        }
    }

    /// Feeds `value` and returns the smoothed output for this step.
    ///
    /// With `advance = false` the current step is recomputed from the same
    /// committed value (repaint).
    #[inline]
    pub fn update(&mut self, value: Price, advance: bool) -> Price {
        if advance && let Some(current) = self.current.filter(|v| !v.is_nan()) {
            self.committed = Some(current);
        }

        let smoothed = match self.committed {
            Some(previous) => self.alpha * value + (1.0 - self.alpha) * previous,
            None => value,
        };
        self.current = Some(smoothed);

        smoothed
    }
}
