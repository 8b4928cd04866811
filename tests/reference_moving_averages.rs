mod fixtures;

use fixtures::{assert_line, load_bars, load_reference};
use quantdash_ta::{
    Dema, DemaConfig, Ema, EmaConfig, Hma, HmaConfig, Sma, SmaConfig, Tema, TemaConfig, Wma,
    WmaConfig,
};
use std::num::NonZero;

fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).unwrap()
}

#[test]
fn sma_20_close_matches_reference() {
    let bars = load_bars();
    let points = Sma::batch(SmaConfig::close(nz(20)), &bars);
    assert_line("SMA(20)", &points, &load_reference("sma-20-close.csv"), "expected", |v| *v);
}

#[test]
fn sma_10_hlc3_matches_reference() {
    let bars = load_bars();
    let points = Sma::batch(SmaConfig::hlc3(nz(10)), &bars);
    assert_line(
        "SMA(10, HLC3)",
        &points,
        &load_reference("sma-10-hlc3.csv"),
        "expected",
        |v| *v,
    );
}

#[test]
fn ema_20_close_matches_reference() {
    let bars = load_bars();
    let points = Ema::batch(EmaConfig::close(nz(20)), &bars);
    assert_line("EMA(20)", &points, &load_reference("ema-20-close.csv"), "expected", |v| *v);
}

#[test]
fn wma_10_close_matches_reference() {
    let bars = load_bars();
    let points = Wma::batch(WmaConfig::close(nz(10)), &bars);
    assert_line("WMA(10)", &points, &load_reference("wma-10-close.csv"), "expected", |v| *v);
}

#[test]
fn hma_16_close_matches_reference() {
    let bars = load_bars();
    let points = Hma::batch(HmaConfig::close(nz(16)), &bars);
    assert_line("HMA(16)", &points, &load_reference("hma-16-close.csv"), "expected", |v| *v);
}

#[test]
fn dema_10_close_matches_reference() {
    let bars = load_bars();
    let points = Dema::batch(DemaConfig::close(nz(10)), &bars);
    assert_line("DEMA(10)", &points, &load_reference("dema-10-close.csv"), "expected", |v| *v);
}

#[test]
fn tema_10_close_matches_reference() {
    let bars = load_bars();
    let points = Tema::batch(TemaConfig::close(nz(10)), &bars);
    assert_line("TEMA(10)", &points, &load_reference("tema-10-close.csv"), "expected", |v| *v);
}

#[test]
fn ribbon_lines_match_standalone_emas() {
    let bars = load_bars();
    let periods = [nz(8), nz(21), nz(55)];
    let ribbon = quantdash_ta::ma_ribbon(&bars, &periods);

    assert_eq!(ribbon.len(), periods.len());
    for period in periods {
        let line = &ribbon[&format!("ema{period}")];
        let standalone = Ema::batch(EmaConfig::close(period), &bars);
        assert_eq!(line, &standalone);
    }
}
