mod fixtures;

use fixtures::{assert_line, assert_near, load_bars, load_reference};
use quantdash_ta::{
    Cmf, CmfConfig, Fi, FiConfig, Mfi, MfiConfig, Obv, ObvConfig, Pivot, PivotConfig, Side,
    VolumeProfile, VolumeProfileConfig, Vwap, VwapConfig,
};

#[test]
fn obv_matches_reference() {
    let bars = load_bars();
    let points = Obv::batch(ObvConfig, &bars);
    assert_line("OBV", &points, &load_reference("obv.csv"), "expected", |v| *v);
}

#[test]
fn vwap_matches_reference() {
    let bars = load_bars();
    let points = Vwap::batch(VwapConfig, &bars);
    assert_line("VWAP", &points, &load_reference("vwap.csv"), "expected", |v| *v);
}

#[test]
fn cmf_20_matches_reference() {
    let bars = load_bars();
    let points = Cmf::batch(CmfConfig::default(), &bars);
    assert_line("CMF(20)", &points, &load_reference("cmf-20.csv"), "expected", |v| *v);
}

#[test]
fn mfi_14_matches_reference() {
    let bars = load_bars();
    let points = Mfi::batch(MfiConfig::default(), &bars);
    assert_line("MFI(14)", &points, &load_reference("mfi-14.csv"), "expected", |v| *v);
}

#[test]
fn fi_13_matches_reference() {
    let bars = load_bars();
    let points = Fi::batch(FiConfig::default(), &bars);
    assert_line("FI(13)", &points, &load_reference("fi-13.csv"), "expected", |v| *v);
}

#[test]
fn pivot_matches_reference() {
    let bars = load_bars();
    let points = Pivot::batch(PivotConfig, &bars);
    let reference = load_reference("pivot.csv");

    assert_line("Pivot", &points, &reference, "pivot", |v| v.pivot());
    assert_line("Pivot", &points, &reference, "r1", |v| v.r1());
    assert_line("Pivot", &points, &reference, "r2", |v| v.r2());
    assert_line("Pivot", &points, &reference, "r3", |v| v.r3());
    assert_line("Pivot", &points, &reference, "s1", |v| v.s1());
    assert_line("Pivot", &points, &reference, "s2", |v| v.s2());
    assert_line("Pivot", &points, &reference, "s3", |v| v.s3());
}

mod volume_profile {
    use super::*;

    fn profile() -> VolumeProfile {
        VolumeProfile::compute(VolumeProfileConfig::default(), &load_bars())
    }

    #[test]
    fn bins_span_the_close_range() {
        let bars = load_bars();
        let profile = profile();
        let bins = profile.bins();

        let lowest = bars.iter().map(|b| b.close).fold(f64::INFINITY, f64::min);
        let highest = bars.iter().map(|b| b.close).fold(f64::NEG_INFINITY, f64::max);

        assert_eq!(bins.len(), 20);
        assert_eq!(bins[0].price_low(), lowest);
        assert_eq!(bins[19].price_high(), highest);
        for pair in bins.windows(2) {
            assert_near(pair[0].price_high(), pair[1].price_low(), "adjacent bin edges");
        }
    }

    #[test]
    fn accounts_for_every_bar() {
        let bars = load_bars();
        let profile = profile();

        let total: f64 = bars.iter().map(|b| b.volume).sum();
        assert_near(profile.total_volume(), total, "total volume");
        for bin in profile.bins() {
            assert_near(
                bin.buy_volume() + bin.sell_volume(),
                bin.volume(),
                "buy + sell volume",
            );
        }
    }

    #[test]
    fn sides_follow_dominant_volume() {
        for bin in profile().bins() {
            let expected = if bin.buy_volume() >= bin.sell_volume() {
                Side::Buy
            } else {
                Side::Sell
            };
            assert_eq!(bin.side(), expected);
        }
    }

    #[test]
    fn value_area_contains_point_of_control() {
        let profile = profile();
        let poc = profile.point_of_control().unwrap();
        let area = profile
            .value_area(VolumeProfile::DEFAULT_VALUE_AREA)
            .unwrap();

        assert!(area.low() <= poc.price_low());
        assert!(area.high() >= poc.price_high());
        assert!(area.volume() >= profile.total_volume() * VolumeProfile::DEFAULT_VALUE_AREA);
        assert!(profile.bins().iter().all(|b| b.volume() <= poc.volume()));
    }
}
