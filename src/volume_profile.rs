use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use tracing::debug;

use crate::{IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price};

/// Configuration for a [`VolumeProfile`].
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct VolumeProfileConfig {
    bins: usize,
}

impl IndicatorConfig for VolumeProfileConfig {
    type Builder = VolumeProfileConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        VolumeProfileConfigBuilder::new()
    }
}

impl VolumeProfileConfig {
    /// Number of equal-width price bins.
    #[inline]
    #[must_use]
    pub fn bins(&self) -> usize {
        self.bins
    }

    #[must_use]
    pub fn new(bins: NonZero<usize>) -> Self {
        Self::builder().bins(bins).build()
    }
}

impl Default for VolumeProfileConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for VolumeProfileConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VolumeProfileConfig({})", self.bins)
    }
}

/// Builder for [`VolumeProfileConfig`]. Default: 20 bins.
pub struct VolumeProfileConfigBuilder {
    bins: usize,
}

impl VolumeProfileConfigBuilder {
    fn new() -> Self {
        Self { bins: 20 }
    }

    #[inline]
    #[must_use]
    pub fn bins(mut self, bins: NonZero<usize>) -> Self {
        self.bins = bins.get();
        self
    }
}

impl IndicatorConfigBuilder<VolumeProfileConfig> for VolumeProfileConfigBuilder {
    #[inline]
    fn build(self) -> VolumeProfileConfig {
        VolumeProfileConfig { bins: self.bins }
    }
}

/// Which side dominated a bin's volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Volume of bars closing at or above their open was at least as large.
    Buy,
    Sell,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// One price bucket of a [`VolumeProfile`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeBin {
    price_low: Price,
    price_high: Price,
    volume: f64,
    buy_volume: f64,
    sell_volume: f64,
}

impl VolumeBin {
    #[inline]
    #[must_use]
    pub fn price_low(&self) -> Price {
        self.price_low
    }

    #[inline]
    #[must_use]
    pub fn price_high(&self) -> Price {
        self.price_high
    }

    /// Total volume of bars whose close fell in this bin.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    #[inline]
    #[must_use]
    pub fn buy_volume(&self) -> f64 {
        self.buy_volume
    }

    #[inline]
    #[must_use]
    pub fn sell_volume(&self) -> f64 {
        self.sell_volume
    }

    #[inline]
    #[must_use]
    pub fn side(&self) -> Side {
        if self.buy_volume >= self.sell_volume {
            Side::Buy
        } else {
            Side::Sell
        }
    }
}

impl Display for VolumeBin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}]: {} ({})",
            self.price_low,
            self.price_high,
            self.volume,
            self.side()
        )
    }
}

/// Price range holding the requested share of a profile's volume.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueArea {
    low: Price,
    high: Price,
    volume: f64,
}

impl ValueArea {
    #[inline]
    #[must_use]
    pub fn low(&self) -> Price {
        self.low
    }

    #[inline]
    #[must_use]
    pub fn high(&self) -> Price {
        self.high
    }

    /// Volume inside the area.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.volume
    }
}

/// Volume traded per close-price level.
///
/// The observed close range is split into `bins` equal-width buckets,
/// lowest price first. Each bar adds its volume to the bucket holding its
/// close, as buy volume when it closed at or above its open and as sell
/// volume otherwise. A series whose closes never move yields a single
/// bucket of zero width.
///
/// # Example
///
/// ```
/// use quantdash_ta::{Bar, Side, VolumeProfile, VolumeProfileConfig};
/// use std::num::NonZero;
///
/// let bars = [
///     Bar::new("d0", 10.0, 10.0, 10.0, 10.0, 100.0),
///     Bar::new("d1", 10.0, 15.0, 10.0, 15.0, 300.0),
///     Bar::new("d2", 16.0, 16.0, 11.0, 11.0, 50.0),
/// ];
/// let profile = VolumeProfile::compute(VolumeProfileConfig::new(NonZero::new(2).unwrap()), &bars);
///
/// let [low, high] = profile.bins() else { panic!() };
/// assert_eq!((low.volume(), low.side()), (150.0, Side::Buy));
/// assert_eq!(high.price_high(), 15.0);
/// assert_eq!(profile.point_of_control(), Some(high));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeProfile {
    bins: Vec<VolumeBin>,
}

impl VolumeProfile {
    /// Share of total volume covered by [`VolumeProfile::value_area`] in
    /// common usage.
    pub const DEFAULT_VALUE_AREA: f64 = 0.70;

    #[must_use]
    pub fn compute<B: Ohlcv>(config: VolumeProfileConfig, bars: &[B]) -> Self {
        if bars.is_empty() {
            debug!(config = %config, "empty series, no volume profile");
            return Self::default();
        }

        let (lowest, highest) = bars.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lowest, highest), bar| (lowest.min(bar.close()), highest.max(bar.close())),
        );

        let range = highest - lowest;
        let count = if range == 0.0 {
            debug!(price = lowest, "zero-width close range, single bin");
            1
        } else {
            config.bins
        };
        #[allow(clippy::cast_precision_loss)]
        let width = range / count as f64;

        let mut bins: Vec<VolumeBin> = (0..count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let (from, to) = (i as f64, (i + 1) as f64);
                VolumeBin {
                    price_low: lowest + from * width,
                    price_high: if i + 1 == count {
                        highest
                    } else {
                        lowest + to * width
                    },
                    volume: 0.0,
                    buy_volume: 0.0,
                    sell_volume: 0.0,
                }
            })
            .collect();

        for bar in bars {
            let index = if width == 0.0 {
                0
            } else {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let index = ((bar.close() - lowest) / width).floor() as usize;
                index.min(count - 1)
            };

            let bin = &mut bins[index];
            let volume = bar.volume();
            bin.volume += volume;
            if bar.close() >= bar.open() {
                bin.buy_volume += volume;
            } else {
                bin.sell_volume += volume;
            }
        }

        Self { bins }
    }

    /// Buckets ordered from the lowest price up.
    #[inline]
    #[must_use]
    pub fn bins(&self) -> &[VolumeBin] {
        &self.bins
    }

    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.bins.iter().map(VolumeBin::volume).sum()
    }

    /// Bucket with the most volume. Ties go to the lowest price.
    #[must_use]
    pub fn point_of_control(&self) -> Option<&VolumeBin> {
        self.point_of_control_index().map(|i| &self.bins[i])
    }

    /// Grows a price range outward from the point of control until it
    /// holds `fraction` of the total volume.
    ///
    /// Each step absorbs whichever neighbouring bucket has more volume,
    /// preferring the lower one on ties. `fraction` is clamped to `0..=1`.
    #[must_use]
    pub fn value_area(&self, fraction: f64) -> Option<ValueArea> {
        let poc = self.point_of_control_index()?;
        let target = self.total_volume() * fraction.clamp(0.0, 1.0);

        let (mut low, mut high) = (poc, poc);
        let mut volume = self.bins[poc].volume;
        while volume < target {
            let below = low.checked_sub(1).map(|i| self.bins[i].volume);
            let above = self.bins.get(high + 1).map(|bin| bin.volume);

            match (below, above) {
                (Some(b), Some(a)) if b >= a => {
                    low -= 1;
                    volume += b;
                }
                (Some(b), None) => {
                    low -= 1;
                    volume += b;
                }
                (_, Some(a)) => {
                    high += 1;
                    volume += a;
                }
                (None, None) => break,
            }
        }

        Some(ValueArea {
            low: self.bins[low].price_low,
            high: self.bins[high].price_high,
            volume,
        })
    }

    fn point_of_control_index(&self) -> Option<usize> {
        self.bins
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, bin)| match best {
                Some((_, volume)) if volume >= bin.volume => best,
                _ => Some((i, bin.volume)),
            })
            .map(|(i, _)| i)
    }
}
