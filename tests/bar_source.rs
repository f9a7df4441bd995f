mod fixtures;

use fixtures::{DATA_DIR, TS_CODE, load_reference_bars, source, trade_date};
use kdj_ta::{
    BarRequest, BarSource, CsvBarSource, Frequency, NaiveDate, SourceError, compute_kdj,
    fetch_sorted,
};

#[test]
fn raw_fetch_keeps_file_order() {
    let request = BarRequest::realtime(TS_CODE, trade_date());
    let bars = source().fetch(&request).expect("fixture exists");

    // Fixture is stored newest first.
    assert!(bars.first().unwrap().trade_time > bars.last().unwrap().trade_time);
}

#[test]
fn fetch_sorted_orders_ascending() {
    let bars = load_reference_bars(Frequency::Min1);

    assert!(bars.windows(2).all(|w| w[0].trade_time < w[1].trade_time));
}

#[test]
fn filters_by_trade_date() {
    // 1min fixture also holds the last 30 bars of the previous day.
    let day = load_reference_bars(Frequency::Min1);
    assert_eq!(day.len(), 240);

    let previous = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
    let request = BarRequest::realtime(TS_CODE, previous);
    let bars = fetch_sorted(&source(), &request).unwrap();
    assert_eq!(bars.len(), 30);
    assert!(bars.iter().all(|b| b.trade_time < day[0].trade_time));
}

#[test]
fn first_bar_of_session() {
    let bars = load_reference_bars(Frequency::Min1);
    // 2024-03-15 09:31:00
    assert_eq!(bars[0].trade_time, 1_710_495_060);
    assert!(bars[0].volume > 0.0);
}

#[test]
fn skips_rows_for_other_codes() {
    let path = source().path_for(&BarRequest::realtime(TS_CODE, trade_date()));
    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let foreign = rdr
        .records()
        .map(|r| r.unwrap())
        .filter(|r| r.get(0) != Some(TS_CODE))
        .count();
    // 1min fixture carries a few 600000.SH rows interleaved mid-session.
    assert_eq!(foreign, 5);

    let bars = load_reference_bars(Frequency::Min1);
    assert_eq!(bars.len(), 240);
    // 600000.SH traded around 7.1, 000001.SZ never below 10.
    assert!(bars.iter().all(|b| b.close > 10.0 && b.low > 10.0));
}

#[test]
fn other_code_yields_not_found() {
    let request = BarRequest::realtime("600000.SH", trade_date());
    let err = fetch_sorted(&source(), &request).unwrap_err();

    match err {
        SourceError::NotFound { path } => {
            assert!(path.ends_with("600000.SH_1min.csv"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn missing_frequency_yields_not_found() {
    let request = BarRequest::intraday(TS_CODE, trade_date(), Frequency::Min60);
    assert!(matches!(
        fetch_sorted(&source(), &request),
        Err(SourceError::NotFound { .. })
    ));
}

#[test]
#[cfg(unix)]
fn unreadable_root_yields_io_error() {
    // Root is a regular file, so opening anything beneath it fails with ENOTDIR.
    let request = BarRequest::realtime(TS_CODE, trade_date());
    let root = source().path_for(&request);
    let err = fetch_sorted(&CsvBarSource::new(root), &request).unwrap_err();

    match err {
        SourceError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotADirectory),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn date_without_data_is_empty() {
    let request = BarRequest::realtime(TS_CODE, NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
    let bars = fetch_sorted(&source(), &request).unwrap();

    assert!(bars.is_empty());
    assert!(compute_kdj(&bars, 9, 3, 3).unwrap().is_empty());
}

#[test]
fn five_minute_bars_cover_the_session() {
    let bars = load_reference_bars(Frequency::Min5);
    assert_eq!(bars.len(), 48);
}

#[test]
fn fetch_then_compute() {
    let source = CsvBarSource::new(DATA_DIR);
    let request = BarRequest::intraday(TS_CODE, trade_date(), Frequency::Min5);

    let bars = fetch_sorted(&source, &request).unwrap();
    let rows = compute_kdj(&bars, 9, 3, 3).unwrap();

    assert_eq!(rows.len(), bars.len());
    assert!(rows.iter().all(|row| !row.is_nan()));
}
