#![allow(dead_code)]

use kdj_ta::{BarRequest, CsvBarSource, Frequency, KdjValue, NaiveDate, PriceBar, fetch_sorted};
use serde::{Deserialize, de::DeserializeOwned};

pub const DATA_DIR: &str = "tests/fixtures/data";
pub const TS_CODE: &str = "000001.SZ";

/// Reference KDJ row with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefKdj {
    pub trade_time: u64,
    pub k: f64,
    pub d: f64,
    pub j: f64,
}

pub fn trade_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
}

pub fn source() -> CsvBarSource {
    CsvBarSource::new(DATA_DIR)
}

/// Load one trading day of reference bars, sorted by trade time.
pub fn load_reference_bars(freq: Frequency) -> Vec<PriceBar> {
    let request = BarRequest::intraday(TS_CODE, trade_date(), freq);
    fetch_sorted(&source(), &request)
        .unwrap_or_else(|e| panic!("failed to load {freq} bars: {e}"))
}

/// Load KDJ reference data (k, d, j per bar).
pub fn load_kdj_ref(path: &str) -> Vec<RefKdj> {
    load_records(path, "invalid KDJ reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Assert all three KDJ lines match the reference row.
pub fn assert_kdj_near(actual: &KdjValue, expected: &RefKdj, tolerance: f64, context: &str) {
    assert_near(actual.k(), expected.k, tolerance, &format!("{context} K"));
    assert_near(actual.d(), expected.d, tolerance, &format!("{context} D"));
    assert_near(actual.j(), expected.j, tolerance, &format!("{context} J"));
}

/// Creates perturbed versions of a bar to simulate live repaints.
///
/// Returns 2 intermediate bars (with shifted close/high/low) followed
/// by the original bar. All share the same `trade_time`.
pub fn repaint_sequence(bar: &PriceBar) -> Vec<PriceBar> {
    let t = bar.trade_time;
    vec![
        // First tick: only open is known, close near open
        PriceBar::new(t, bar.open, bar.open * 1.001, bar.open * 0.999, bar.open * 1.0005),
        // Mid-bar: partial movement toward final values
        PriceBar::new(
            t,
            bar.open,
            bar.open.midpoint(bar.high),
            bar.open.midpoint(bar.low),
            bar.open.midpoint(bar.close),
        ),
        // Final: real OHLC values
        *bar,
    ]
}

pub fn assert_values_match(
    bar_idx: usize,
    closed: Option<KdjValue>,
    repainted: Option<KdjValue>,
    tolerance: f64,
) {
    match (closed, repainted) {
        (Some(c), Some(r)) => {
            for (line, cv, rv) in [("K", c.k(), r.k()), ("D", c.d(), r.d()), ("J", c.j(), r.j())] {
                let diff = (cv - rv).abs();
                assert!(
                    diff <= tolerance,
                    "KDJ {line} diverged at bar {bar_idx}: closed={cv:.10}, repainted={rv:.10}, diff={diff:.2e}"
                );
            }
        }
        (c, r) => {
            panic!("KDJ missing value at bar {bar_idx}: closed={c:?}, repainted={r:?}");
        }
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
