//! The per-instrument set of timeframe series evaluated in one cycle.

use std::collections::BTreeMap;

use crate::domain::{Candle, Timeframe};

use super::resample;

/// Candle series keyed by timeframe.
///
/// Always holds the base tier and the three derived tiers; holds the
/// precision tier only when one was supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeframeSeries {
    tiers: BTreeMap<Timeframe, Vec<Candle>>,
}

impl TimeframeSeries {
    /// Build every derived tier from `base` and attach the optional 30-second
    /// series.
    pub fn from_base(base: &[Candle], precision: Option<Vec<Candle>>) -> Self {
        let mut tiers = BTreeMap::new();
        for tf in Timeframe::DERIVED {
            if let Some(factor) = tf.resample_factor() {
                tiers.insert(tf, resample(base, factor));
            }
        }
        tiers.insert(Timeframe::BASE, base.to_vec());
        if let Some(fine) = precision {
            tiers.insert(Timeframe::Sec30, fine);
        }
        Self { tiers }
    }

    /// Candles of one tier; `None` when the tier is absent.
    pub fn get(&self, timeframe: Timeframe) -> Option<&[Candle]> {
        self.tiers.get(&timeframe).map(Vec::as_slice)
    }

    /// The base (5-minute) series.
    pub fn base(&self) -> &[Candle] {
        self.get(Timeframe::BASE).unwrap_or(&[])
    }

    pub fn has_precision(&self) -> bool {
        self.tiers.contains_key(&Timeframe::Sec30)
    }

    /// Present tiers, finest first.
    pub fn timeframes(&self) -> impl Iterator<Item = Timeframe> + '_ {
        self.tiers.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Timeframe, &[Candle])> + '_ {
        self.tiers.iter().map(|(tf, c)| (*tf, c.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_candles;

    #[test]
    fn from_base_builds_derived_tiers() {
        let closes: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
        let base = make_candles(&closes);
        let series = TimeframeSeries::from_base(&base, None);

        assert_eq!(series.base().len(), 100);
        assert_eq!(series.get(Timeframe::Min15).unwrap().len(), 34);
        assert_eq!(series.get(Timeframe::Hour1).unwrap().len(), 9);
        assert_eq!(series.get(Timeframe::Hour4).unwrap().len(), 3);
        assert!(!series.has_precision());
        assert_eq!(series.timeframes().count(), 4);
    }

    #[test]
    fn precision_series_is_attached_verbatim() {
        let base = make_candles(&[1.0, 2.0, 3.0]);
        let fine = make_candles(&[9.0, 8.0]);
        let series = TimeframeSeries::from_base(&base, Some(fine.clone()));
        assert!(series.has_precision());
        assert_eq!(series.get(Timeframe::Sec30).unwrap(), fine.as_slice());
        assert_eq!(series.timeframes().next(), Some(Timeframe::Sec30));
    }

    #[test]
    fn empty_base_yields_empty_tiers() {
        let series = TimeframeSeries::from_base(&[], None);
        assert!(series.iter().all(|(_, candles)| candles.is_empty()));
        assert_eq!(series.timeframes().count(), 4);
    }
}
