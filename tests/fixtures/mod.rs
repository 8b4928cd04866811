#![allow(dead_code)]

use std::collections::HashMap;

use quantdash_ta::{Ohlcv, Point, Price};
use serde::{Deserialize, de::DeserializeOwned};

/// Daily OHLCV bar parsed from the fixture CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
    fn date(&self) -> &str {
        &self.date
    }

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

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Reference output: one row per fixture bar, one named column per line.
pub struct RefTable {
    dates: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
}

impl RefTable {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn column(&self, name: &str) -> &[f64] {
        self.columns
            .get(name)
            .unwrap_or_else(|| panic!("reference has no column {name:?}"))
    }

    /// The single `expected` column of a one-line indicator.
    pub fn expected(&self) -> &[f64] {
        self.column("expected")
    }
}

const DATA_DIR: &str = "tests/fixtures/data";

/// 320 synthetic daily bars. Bar 57 is flat, bar 91 has zero volume and
/// bar 133 repeats the previous close.
pub fn load_bars() -> Vec<RefBar> {
    load_records(&format!("{DATA_DIR}/bars.csv"))
}

/// Loads `tests/fixtures/data/{name}`.
pub fn load_reference(name: &str) -> RefTable {
    let path = format!("{DATA_DIR}/{name}");
    let mut rdr =
        csv::Reader::from_path(&path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    let headers = rdr
        .headers()
        .unwrap_or_else(|e| panic!("failed to read headers of {path}: {e}"))
        .clone();
    let mut dates = Vec::new();
    let mut columns: HashMap<String, Vec<f64>> = headers
        .iter()
        .skip(1)
        .map(|name| (name.to_owned(), Vec::new()))
        .collect();

    for record in rdr.records() {
        let record = record.unwrap_or_else(|e| panic!("invalid record in {path}: {e}"));
        dates.push(record[0].to_owned());
        for (name, field) in headers.iter().zip(record.iter()).skip(1) {
            let value = field
                .parse()
                .unwrap_or_else(|e| panic!("invalid {name} {field:?} in {path}: {e}"));
            columns.entry(name.to_owned()).or_default().push(value);
        }
    }

    RefTable { dates, columns }
}

/// Relative tolerance against reference values computed in the same
/// operation order.
pub const TOLERANCE: f64 = 1e-9;

/// Assert two f64 values agree within `TOLERANCE × max(1, |expected|)`.
pub fn assert_near(actual: f64, expected: f64, context: &str) {
    let diff = (actual - expected).abs();
    let tolerance = TOLERANCE * expected.abs().max(1.0);
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.12}, got {actual:.12}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Compares one line of a batch against a reference column, bar by bar.
pub fn assert_line<V>(
    label: &str,
    points: &[Point<V>],
    reference: &RefTable,
    column: &str,
    line: impl Fn(&V) -> f64,
) {
    assert_eq!(
        points.len(),
        reference.len(),
        "{label}: expected one point per bar"
    );

    let expected = reference.column(column);
    for (i, point) in points.iter().enumerate() {
        assert_eq!(point.date, reference.dates()[i], "{label}: date at bar {i}");
        assert_near(
            line(&point.value),
            expected[i],
            &format!("{label} {column} at bar {i} ({})", point.date),
        );
    }
}

fn load_records<D>(path: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize()
        .map(|r| r.unwrap_or_else(|e| panic!("invalid record in {path}: {e}")))
        .collect()
}
