//! Technical analysis indicators over OHLCV bar series.
//!
//! Every indicator is a streaming accumulator: feed bars one at a time with
//! `compute`, or run a whole series with `batch`, which returns one
//! [`Point`] per input bar in input order. Both paths share the same state
//! machine, so a batch over `bars[..n]` is always a prefix of a batch over
//! `bars[..n + 1]`.
//!
//! Indicators accept any type implementing [`Ohlcv`]. Outputs are always
//! defined: during warm-up windows shrink to the bars seen so far or a
//! documented neutral value is returned.
//!
//! Each indicator type exposes [`new`](Sma::new), [`compute`](Sma::compute),
//! [`value`](Sma::value) and [`batch`](Sma::batch) as inherent methods, no
//! trait import needed. Import [`Indicator`] only for generic code.
//!
//! # Families
//!
//! - Moving averages: [`Sma`], [`Ema`], [`Wma`], [`Hma`], [`Dema`],
//!   [`Tema`], plus [`ma_ribbon`].
//! - Momentum: [`Rsi`], [`Macd`], [`Stoch`], [`Cci`], [`Roc`], [`WillR`],
//!   [`Uo`], [`Trix`].
//! - Volatility: [`Atr`], [`Bb`], [`Kc`], [`Dc`], [`Squeeze`].
//! - Trend: [`Adx`], [`Supertrend`], [`Psar`], [`Aroon`], [`Ichimoku`].
//! - Volume: [`Obv`], [`Vwap`], [`Cmf`], [`Mfi`], [`Fi`], [`Pivot`] and the
//!   [`VolumeProfile`] summary.
//!
//! # Example
//!
//! ```
//! use quantdash_ta::{Bar, Rsi, RsiConfig};
//!
//! let bars: Vec<Bar> = (0..30)
//!     .map(|i| {
//!         let close = 100.0 + f64::from(i % 5);
//!         Bar::new(format!("d{i}"), close, close + 1.0, close - 1.0, close, 1_000.0)
//!     })
//!     .collect();
//!
//! let rsi = Rsi::batch(RsiConfig::default(), &bars);
//! assert_eq!(rsi.len(), bars.len());
//! assert_eq!(rsi[29].date, "d29");
//! assert!(rsi.iter().all(|p| (0.0..=100.0).contains(&p.value)));
//! ```

use std::num::NonZero;

mod direction;
mod error;
mod indicator;
mod multiplier;
mod ohlcv;
mod point;
mod price_source;
mod price_window;

pub mod math;

mod dema;
mod ema;
mod hma;
mod ribbon;
mod sma;
mod tema;
mod wma;

mod cci;
mod macd;
mod roc;
mod rsi;
mod stoch;
mod trix;
mod uo;
mod willr;

mod atr;
mod bb;
mod dc;
mod kc;
mod squeeze;

mod adx;
mod aroon;
mod ichimoku;
mod psar;
mod supertrend;

mod cmf;
mod fi;
mod mfi;
mod obv;
mod pivot;
mod volume_profile;
mod vwap;

pub use crate::direction::Direction;
pub use crate::error::Error;
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::multiplier::Multiplier;
pub use crate::ohlcv::{Bar, Ohlcv, Price};
pub use crate::point::{Point, PrimaryValue};
pub use crate::price_source::PriceSource;

pub use crate::dema::{Dema, DemaConfig, DemaConfigBuilder};
pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::hma::{Hma, HmaConfig, HmaConfigBuilder};
pub use crate::ribbon::{DEFAULT_RIBBON_PERIODS, ma_ribbon};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder};
pub use crate::tema::{Tema, TemaConfig, TemaConfigBuilder};
pub use crate::wma::{Wma, WmaConfig, WmaConfigBuilder};

pub use crate::cci::{Cci, CciConfig, CciConfigBuilder};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdValue};
pub use crate::roc::{Roc, RocConfig, RocConfigBuilder};
pub use crate::rsi::{Rsi, RsiConfig, RsiConfigBuilder};
pub use crate::stoch::{Stoch, StochConfig, StochConfigBuilder, StochValue};
pub use crate::trix::{Trix, TrixConfig, TrixConfigBuilder};
pub use crate::uo::{Uo, UoConfig, UoConfigBuilder};
pub use crate::willr::{WillR, WillRConfig, WillRConfigBuilder};

pub use crate::atr::{Atr, AtrConfig, AtrConfigBuilder};
pub use crate::bb::{Bb, BbConfig, BbConfigBuilder, BbValue};
pub use crate::dc::{Dc, DcConfig, DcConfigBuilder, DcValue};
pub use crate::kc::{Kc, KcConfig, KcConfigBuilder, KcValue};
pub use crate::squeeze::{Squeeze, SqueezeConfig, SqueezeConfigBuilder, SqueezeValue};

pub use crate::adx::{Adx, AdxConfig, AdxConfigBuilder, AdxValue};
pub use crate::aroon::{Aroon, AroonConfig, AroonConfigBuilder, AroonValue};
pub use crate::ichimoku::{Ichimoku, IchimokuConfig, IchimokuConfigBuilder, IchimokuValue};
pub use crate::psar::{Psar, PsarConfig, PsarConfigBuilder, PsarValue};
pub use crate::supertrend::{
    Supertrend, SupertrendConfig, SupertrendConfigBuilder, SupertrendValue,
};

pub use crate::cmf::{Cmf, CmfConfig, CmfConfigBuilder};
pub use crate::fi::{Fi, FiConfig, FiConfigBuilder};
pub use crate::mfi::{Mfi, MfiConfig, MfiConfigBuilder};
pub use crate::obv::{Obv, ObvConfig};
pub use crate::pivot::{Pivot, PivotConfig, PivotValue};
pub use crate::volume_profile::{
    Side, ValueArea, VolumeBin, VolumeProfile, VolumeProfileConfig, VolumeProfileConfigBuilder,
};
pub use crate::vwap::{Vwap, VwapConfig};

/// `NonZero` from a length already validated by a config builder.
///
/// Config fields store lengths as plain `usize` taken from a `NonZero`, so
/// the fallback branch is never reached from a built config.
pub(crate) const fn nonzero(n: usize) -> NonZero<usize> {
    match NonZero::new(n) {
        Some(n) => n,
        None => NonZero::<usize>::MIN,
    }
}

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, bar: &impl Ohlcv) -> $output {
                <Self as Indicator>::compute(self, bar)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }

            /// See [`Indicator::batch`].
            #[must_use]
            pub fn batch<B: Ohlcv>(config: $config, bars: &[B]) -> Vec<Point<$output>> {
                <Self as Indicator>::batch(config, bars)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Price);
impl_indicator_methods!(Ema, EmaConfig, Price);
impl_indicator_methods!(Wma, WmaConfig, Price);
impl_indicator_methods!(Hma, HmaConfig, Price);
impl_indicator_methods!(Dema, DemaConfig, Price);
impl_indicator_methods!(Tema, TemaConfig, Price);

impl_indicator_methods!(Rsi, RsiConfig, f64);
impl_indicator_methods!(Macd, MacdConfig, MacdValue);
impl_indicator_methods!(Stoch, StochConfig, StochValue);
impl_indicator_methods!(Cci, CciConfig, f64);
impl_indicator_methods!(Roc, RocConfig, f64);
impl_indicator_methods!(WillR, WillRConfig, f64);
impl_indicator_methods!(Uo, UoConfig, f64);
impl_indicator_methods!(Trix, TrixConfig, f64);

impl_indicator_methods!(Atr, AtrConfig, Price);
impl_indicator_methods!(Bb, BbConfig, BbValue);
impl_indicator_methods!(Kc, KcConfig, KcValue);
impl_indicator_methods!(Dc, DcConfig, DcValue);
impl_indicator_methods!(Squeeze, SqueezeConfig, SqueezeValue);

impl_indicator_methods!(Adx, AdxConfig, AdxValue);
impl_indicator_methods!(Supertrend, SupertrendConfig, SupertrendValue);
impl_indicator_methods!(Psar, PsarConfig, PsarValue);
impl_indicator_methods!(Aroon, AroonConfig, AroonValue);
impl_indicator_methods!(Ichimoku, IchimokuConfig, IchimokuValue);

impl_indicator_methods!(Obv, ObvConfig, f64);
impl_indicator_methods!(Vwap, VwapConfig, Price);
impl_indicator_methods!(Cmf, CmfConfig, f64);
impl_indicator_methods!(Mfi, MfiConfig, f64);
impl_indicator_methods!(Fi, FiConfig, f64);
impl_indicator_methods!(Pivot, PivotConfig, PivotValue);

#[cfg(test)]
mod test_util;

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod inherent_methods {
    use super::{Bar, Bb, BbConfig, Ema, EmaConfig, Sma, SmaConfig};
    use std::num::NonZero;

    fn bar(close: f64) -> Bar {
        Bar::new("", close, close, close, close, 0.0)
    }

    #[test]
    fn sma_without_indicator_import() {
        let mut sma = Sma::new(SmaConfig::close(NonZero::new(2).unwrap()));
        assert_eq!(sma.compute(&bar(10.0)), 10.0);
        assert_eq!(sma.compute(&bar(20.0)), 15.0);
        assert_eq!(sma.value(), Some(15.0));
    }

    #[test]
    fn ema_without_indicator_import() {
        let mut ema = Ema::new(EmaConfig::close(NonZero::new(2).unwrap()));
        assert_eq!(ema.value(), None);
        assert_eq!(ema.compute(&bar(10.0)), 10.0);
        assert!(ema.value().is_some());
    }

    #[test]
    fn bb_batch_without_indicator_import() {
        let bars = [bar(10.0), bar(20.0)];
        let points = Bb::batch(BbConfig::close(NonZero::new(2).unwrap()), &bars);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].value.middle(), 15.0);
    }

    #[test]
    fn nonzero_keeps_positive_lengths() {
        assert_eq!(super::nonzero(7).get(), 7);
        assert_eq!(super::nonzero(0).get(), 1);
    }
}
