use serde::{Deserialize, Serialize};

/// One OHLCV sample for a fixed time interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Typical price: (high + low + close) / 3.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// True when every price and volume field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }
}

/// Summary of the fetched window used by the text report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub last_close: f64,
    /// Change of the latest close versus the previous one, in percent.
    pub change_pct: Option<f64>,
    pub last_volume: f64,
    pub high: f64,
    pub low: f64,
}

impl SessionStats {
    /// Summarize a bar series. Returns None for an empty series.
    pub fn from_bars(bars: &[Bar]) -> Option<Self> {
        let last = bars.last()?;
        let change_pct = bars
            .len()
            .checked_sub(2)
            .map(|i| bars[i].close)
            .filter(|prev| *prev != 0.0)
            .map(|prev| (last.close - prev) / prev * 100.0);

        Some(Self {
            last_close: last.close,
            change_pct,
            last_volume: last.volume,
            high: bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max),
            low: bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min),
        })
    }
}
