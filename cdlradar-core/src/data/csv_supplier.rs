//! CSV candle files: one file per symbol and interval.
//!
//! Layout: `<dir>/<symbol>.csv` for the base tier, `<dir>/<symbol>_<interval>.csv`
//! for any other tier, with `/` in the symbol replaced by `_`. Header:
//! `datetime,open,high,low,close,volume`.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Candle, Timeframe};

use super::provider::{keep_last, CandleError, CandleSupplier, RawCandle, WireNumber};

#[derive(Debug, Deserialize, Serialize)]
struct CsvRow {
    datetime: String,
    open: String,
    high: String,
    low: String,
    close: String,
    #[serde(default)]
    volume: Option<String>,
}

impl From<CsvRow> for RawCandle {
    fn from(row: CsvRow) -> Self {
        RawCandle {
            datetime: row.datetime,
            open: WireNumber::Text(row.open),
            high: WireNumber::Text(row.high),
            low: WireNumber::Text(row.low),
            close: WireNumber::Text(row.close),
            volume: row.volume.map(WireNumber::Text),
        }
    }
}

/// File-backed supplier reading one CSV per symbol/interval.
#[derive(Debug, Clone)]
pub struct CsvSupplier {
    dir: PathBuf,
}

impl CsvSupplier {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `symbol` at `interval`.
    pub fn path_for(&self, symbol: &str, interval: Timeframe) -> PathBuf {
        let stem = symbol.replace('/', "_");
        let file = if interval == Timeframe::BASE {
            format!("{stem}.csv")
        } else {
            format!("{stem}_{}.csv", interval.label())
        };
        self.dir.join(file)
    }

    /// Write `candles` to the file for `symbol` at `interval`, creating the
    /// directory if needed.
    pub fn write(
        &self,
        symbol: &str,
        interval: Timeframe,
        candles: &[Candle],
    ) -> Result<PathBuf, CandleError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(symbol, interval);
        write_candles(&path, candles)?;
        Ok(path)
    }
}

impl CandleSupplier for CsvSupplier {
    fn name(&self) -> &str {
        "csv"
    }

    fn try_fetch(
        &self,
        symbol: &str,
        interval: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, CandleError> {
        let path = self.path_for(symbol, interval);
        if !path.exists() {
            return Err(CandleError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        Ok(keep_last(read_candles(&path)?, count))
    }
}

/// Read a candle CSV, sorted ascending by datetime.
pub fn read_candles(path: &Path) -> Result<Vec<Candle>, CandleError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(File::open(path)?);
    let mut candles = reader
        .deserialize::<CsvRow>()
        .map(|row| RawCandle::from(row?).parse())
        .collect::<Result<Vec<_>, _>>()?;
    candles.sort_by_key(|c| c.datetime);
    Ok(candles)
}

/// Write candles as CSV with the standard header.
pub fn write_candles(path: &Path, candles: &[Candle]) -> Result<(), CandleError> {
    let mut writer = csv::Writer::from_path(path)?;
    for c in candles {
        writer.serialize(CsvRow {
            datetime: c.datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            open: c.open.to_string(),
            high: c.high.to_string(),
            low: c.low.to_string(),
            close: c.close.to_string(),
            volume: Some(c.volume.to_string()),
        })?;
    }
    writer.flush()?;
    Ok(())
}
