use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Multiplier, Ohlcv, Price, PriceSource,
    PrimaryValue, price_source::SourceReader, price_window::PriceWindow,
};

/// Configuration for the Bollinger Bands ([`Bb`]) indicator.
///
/// # Example
///
/// ```
/// use quantdash_ta::{BbConfig, IndicatorConfig, IndicatorConfigBuilder, Multiplier};
/// use std::num::NonZero;
///
/// let config = BbConfig::builder()
///     .length(NonZero::new(20).unwrap())
///     .multiplier(Multiplier::new(2.5))
///     .build();
///
/// assert_eq!(config.length(), 20);
/// assert_eq!(config.multiplier().value(), 2.5);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct BbConfig {
    length: usize,
    multiplier: Multiplier,
    source: PriceSource,
}

impl IndicatorConfig for BbConfig {
    type Builder = BbConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        BbConfigBuilder::new()
    }
}

impl BbConfig {
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Band offset in standard deviations.
    #[inline]
    #[must_use]
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// Bollinger Bands on closing price with the given length and a 2σ offset.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Default for BbConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for BbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BbConfig({}, {}, {})",
            self.length, self.source, self.multiplier
        )
    }
}

/// Builder for [`BbConfig`].
///
/// Defaults: length = 20, multiplier = 2.0, source = [`PriceSource::Close`].
pub struct BbConfigBuilder {
    length: usize,
    multiplier: Multiplier,
    source: PriceSource,
}

impl BbConfigBuilder {
    fn new() -> Self {
        Self {
            length: 20,
            multiplier: Multiplier::new(2.0),
            source: PriceSource::Close,
        }
    }

    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }

    /// Sets the band offset in standard deviations.
    #[inline]
    #[must_use]
    pub fn multiplier(mut self, multiplier: Multiplier) -> Self {
        self.multiplier = multiplier;
        self
    }

    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<BbConfig> for BbConfigBuilder {
    #[inline]
    fn build(self) -> BbConfig {
        BbConfig {
            length: self.length,
            multiplier: self.multiplier,
            source: self.source,
        }
    }
}

/// Bollinger Bands output: upper, middle, and lower bands plus
/// bandwidth and %B.
///
/// The middle band is the SMA. Upper and lower bands are offset by
/// `k × σ`, where `σ` is the population standard deviation of the window.
///
/// ```text
/// upper     = SMA + k × σ
/// middle    = SMA
/// lower     = SMA − k × σ
/// bandwidth = 2 × k × σ / SMA × 100
/// %B        = (close − lower) / (upper − lower)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BbValue {
    upper: Price,
    middle: Price,
    lower: Price,
    bandwidth: f64,
    percent_b: f64,
}

impl BbValue {
    /// Upper band: `SMA + k × σ`.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> Price {
        self.upper
    }

    /// Middle band: SMA of the window.
    #[inline]
    #[must_use]
    pub fn middle(&self) -> Price {
        self.middle
    }

    /// Lower band: `SMA − k × σ`.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> Price {
        self.lower
    }

    /// Band width as a percentage of the middle band. 0 when the middle
    /// band is 0.
    ///
    /// Narrow width indicates consolidation (Bollinger squeeze); wide width
    /// indicates high volatility.
    #[inline]
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Position of the close within the bands: 0 at the lower band, 1 at
    /// the upper band. 0.5 when the bands have collapsed.
    #[inline]
    #[must_use]
    pub fn percent_b(&self) -> f64 {
        self.percent_b
    }
}

impl PrimaryValue for BbValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.middle
    }
}

impl Display for BbValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB(u: {}, m: {}, l: {})",
            self.upper, self.middle, self.lower
        )
    }
}

/// Bollinger Bands (BB).
///
/// A volatility indicator consisting of three bands: a simple moving average
/// (middle) with upper and lower bands offset by a configurable number of
/// standard deviations.
///
/// The mean and the standard deviation are recomputed over the window on
/// every bar (two passes, population variance), so the bands stay exact
/// over long series.
///
/// # Example
///
/// ```
/// use quantdash_ta::{Bar, Bb, BbConfig};
/// use std::num::NonZero;
///
/// let mut bb = Bb::new(BbConfig::close(NonZero::new(2).unwrap()));
/// let bar = |c: f64| Bar::new("", c, c, c, c, 0.0);
///
/// bb.compute(&bar(3.0));
/// let value = bb.compute(&bar(5.0));
///
/// // mean 4, σ 1, k 2
/// assert_eq!(value.upper(), 6.0);
/// assert_eq!(value.middle(), 4.0);
/// assert_eq!(value.lower(), 2.0);
/// ```
#[derive(Clone, Debug)]
pub struct Bb {
    config: BbConfig,
    reader: SourceReader,
    window: PriceWindow,
    current: Option<BbValue>,
}

impl Indicator for Bb {
    type Config = BbConfig;
    type Output = BbValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            reader: SourceReader::new(config.source),
            window: PriceWindow::new(config.length),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> BbValue {
        let price = self.reader.read(ohlcv);
        self.window.push(price);

        let multiplier = self.config.multiplier.value();
        let mean = self.window.mean();
        let std_dev = self.window.stddev();
        let offset = multiplier * std_dev;
        let (upper, lower) = (mean + offset, mean - offset);

        let bandwidth = if mean == 0.0 {
            0.0
        } else {
            std_dev * multiplier * 2.0 / mean * 100.0
        };
        let range = upper - lower;
        let percent_b = if range == 0.0 {
            0.5
        } else {
            (ohlcv.close() - lower) / range
        };

        let value = BbValue {
            upper,
            middle: mean,
            lower,
            bandwidth,
            percent_b,
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<BbValue> {
        self.current
    }
}

impl Display for Bb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB({}, {}, {})",
            self.config.length, self.config.source, self.config.multiplier,
        )
    }
}
