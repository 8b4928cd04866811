mod fixtures;

use fixtures::{assert_line, load_bars, load_reference};
use quantdash_ta::{
    Adx, AdxConfig, Aroon, AroonConfig, Ichimoku, IchimokuConfig, Psar, PsarConfig, Supertrend,
    SupertrendConfig,
};
use std::num::NonZero;

#[test]
fn adx_14_matches_reference() {
    let bars = load_bars();
    let points = Adx::batch(AdxConfig::new(NonZero::new(14).unwrap()), &bars);
    let reference = load_reference("adx-14.csv");

    assert_line("ADX", &points, &reference, "adx", |v| v.adx());
    assert_line("ADX", &points, &reference, "plus_di", |v| v.plus_di());
    assert_line("ADX", &points, &reference, "minus_di", |v| v.minus_di());
}

#[test]
fn supertrend_10_3_matches_reference() {
    let bars = load_bars();
    let points = Supertrend::batch(SupertrendConfig::default(), &bars);
    let reference = load_reference("supertrend-10-3.csv");

    assert_line("Supertrend", &points, &reference, "value", |v| v.value());
    assert_line("Supertrend", &points, &reference, "direction", |v| {
        v.direction().signum()
    });
}

#[test]
fn supertrend_value_is_the_active_band() {
    let bars = load_bars();
    for point in Supertrend::batch(SupertrendConfig::default(), &bars) {
        let v = point.value;
        let band = if v.direction().is_up() { v.lower() } else { v.upper() };
        assert_eq!(v.value().to_bits(), band.to_bits(), "at {}", point.date);
    }
}

#[test]
fn psar_matches_reference() {
    let bars = load_bars();
    let points = Psar::batch(PsarConfig::default(), &bars);
    let reference = load_reference("psar-0.02-0.2.csv");

    assert_line("PSAR", &points, &reference, "sar", |v| v.sar());
    assert_line("PSAR", &points, &reference, "direction", |v| v.direction().signum());
}

#[test]
fn aroon_25_matches_reference() {
    let bars = load_bars();
    let points = Aroon::batch(AroonConfig::default(), &bars);
    let reference = load_reference("aroon-25.csv");

    assert_line("Aroon", &points, &reference, "up", |v| v.up());
    assert_line("Aroon", &points, &reference, "down", |v| v.down());
    assert_line("Aroon", &points, &reference, "oscillator", |v| v.oscillator());
}

#[test]
fn ichimoku_9_26_52_matches_reference() {
    let bars = load_bars();
    let points = Ichimoku::batch(IchimokuConfig::default(), &bars);
    let reference = load_reference("ichimoku-9-26-52.csv");

    assert_line("Ichimoku", &points, &reference, "tenkan", |v| v.tenkan());
    assert_line("Ichimoku", &points, &reference, "kijun", |v| v.kijun());
    assert_line("Ichimoku", &points, &reference, "senkou_a", |v| v.senkou_a());
    assert_line("Ichimoku", &points, &reference, "senkou_b", |v| v.senkou_b());
    assert_line("Ichimoku", &points, &reference, "chikou", |v| v.chikou());
}
