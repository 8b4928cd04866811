use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    price_source::SourceReader, price_window::PriceWindow,
};

/// Configuration for the Weighted Moving Average ([`Wma`]) indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct WmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for WmaConfig {
    type Builder = WmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        WmaConfigBuilder::new()
    }
}

impl WmaConfig {
    /// Window length (number of bars).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// WMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Default for WmaConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for WmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`WmaConfig`].
///
/// Defaults: length = 20, source = [`PriceSource::Close`].
pub struct WmaConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl WmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: 20,
            source: PriceSource::Close,
        }
    }

    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<WmaConfig> for WmaConfigBuilder {
    #[inline]
    fn build(self) -> WmaConfig {
        WmaConfig {
            length: self.length,
            source: self.source,
        }
    }
}

/// Weighted Moving Average (WMA).
///
/// Linearly weighted mean of the last *n* values: the oldest value has
/// weight 1 and the newest weight *n*, normalised by the triangular number
/// `n × (n + 1) / 2`.
///
/// Until the window is full the WMA passes the raw price through
/// unchanged. This differs from [`Sma`](crate::Sma) and
/// [`Ema`](crate::Ema), which average over the available prefix.
///
/// O(n) per bar: the weighted sum is recomputed over the window.
#[derive(Clone, Debug)]
pub struct Wma {
    config: WmaConfig,
    reader: SourceReader,
    window: PriceWindow,
    denominator: f64,
    current: Option<Price>,
}

impl Indicator for Wma {
    type Config = WmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let denominator = (config.length * (config.length + 1)) as f64 / 2.0;

        Self {
            config,
            reader: SourceReader::new(config.source),
            window: PriceWindow::new(config.length),
            denominator,
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Price {
        let price = self.reader.read(ohlcv);
        self.update(price)
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Wma {
    /// Advances the average with a raw value instead of a bar.
    pub fn update(&mut self, price: Price) -> Price {
        self.window.push(price);

        let value = if self.window.is_full() {
            #[allow(clippy::cast_precision_loss)]
            let weighted = self
                .window
                .iter()
                .enumerate()
                .fold(0.0, |acc, (i, x)| acc + x * (i + 1) as f64);
            weighted / self.denominator
        } else {
            price
        };

        self.current = Some(value);
        value
    }
}

impl Display for Wma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WMA({}, {})", self.config.length, self.config.source)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, bar, nz};

    fn wma(length: usize) -> Wma {
        Wma::new(WmaConfig::close(nz(length)))
    }

    #[test]
    fn passes_price_through_before_window_fills() {
        let mut wma = wma(3);
        assert_eq!(wma.compute(&bar(10.0)), 10.0);
        assert_eq!(wma.compute(&bar(30.0)), 30.0);
    }

    #[test]
    fn weights_newest_heaviest() {
        let mut wma = wma(3);
        wma.compute(&bar(1.0));
        wma.compute(&bar(2.0));
        // (1·1 + 2·2 + 3·3) / 6 = 14 / 6
        assert_approx!(wma.compute(&bar(3.0)), 14.0 / 6.0);
    }

    #[test]
    fn slides_window() {
        let mut wma = wma(2);
        for close in [1.0, 2.0, 3.0] {
            wma.compute(&bar(close));
        }
        // (3·1 + 6·2) / 3 = 5
        assert_eq!(wma.compute(&bar(6.0)), 5.0);
    }

    #[test]
    fn length_one_is_identity() {
        let mut wma = wma(1);
        assert_eq!(wma.compute(&bar(7.0)), 7.0);
        assert_eq!(wma.compute(&bar(3.0)), 3.0);
    }

    #[test]
    fn update_matches_compute() {
        let mut by_bar = wma(3);
        let mut by_value = wma(3);
        for close in [4.0, 8.0, 1.0, 6.0] {
            assert_eq!(by_bar.compute(&bar(close)), by_value.update(close));
        }
    }

    #[test]
    fn display() {
        assert_eq!(wma(10).to_string(), "WMA(10, Close)");
        assert_eq!(WmaConfig::default().length(), 20);
    }
}
