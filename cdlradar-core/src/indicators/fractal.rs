//! Fractal (local extremum) detection.
//!
//! A fractal high at `index` is a candle whose high is strictly above the
//! highs of the `size` candles on each side; a fractal low mirrors that on
//! lows. Candidates within `size` of either end of the slice cannot be
//! confirmed and are never fractals.

use crate::domain::Candle;

fn confirmable(len: usize, index: usize, size: usize) -> bool {
    index >= size && index + size < len
}

/// True when `candles[index]` is a strict local high over `size` neighbours.
pub fn fractal_high(candles: &[Candle], index: usize, size: usize) -> bool {
    if !confirmable(candles.len(), index, size) {
        return false;
    }
    let target = candles[index].high;
    (1..=size).all(|i| candles[index - i].high < target && candles[index + i].high < target)
}

/// True when `candles[index]` is a strict local low over `size` neighbours.
pub fn fractal_low(candles: &[Candle], index: usize, size: usize) -> bool {
    if !confirmable(candles.len(), index, size) {
        return false;
    }
    let target = candles[index].low;
    (1..=size).all(|i| candles[index - i].low > target && candles[index + i].low > target)
}
