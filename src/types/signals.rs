use serde::{Deserialize, Serialize};
use std::fmt;

/// Volatility regime derived from ATR as a percentage of price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VolatilityLevel {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

impl VolatilityLevel {
    /// Classify an ATR percentage (>5% high, >2% medium, else low).
    pub fn from_atr_pct(atr_pct: f64) -> Self {
        if atr_pct > 5.0 {
            VolatilityLevel::High
        } else if atr_pct > 2.0 {
            VolatilityLevel::Medium
        } else {
            VolatilityLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VolatilityLevel::High => "High",
            VolatilityLevel::Medium => "Medium",
            VolatilityLevel::Low => "Low",
            VolatilityLevel::Unknown => "Unknown",
        }
    }
}

/// Trend strength bucket derived from ADX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TrendStrength {
    Strong,
    Moderate,
    Weak,
    #[default]
    Unknown,
}

impl TrendStrength {
    /// Classify an ADX reading (>25 strong, >20 moderate, else weak).
    pub fn from_adx(adx: f64) -> Self {
        if adx > 25.0 {
            TrendStrength::Strong
        } else if adx > 20.0 {
            TrendStrength::Moderate
        } else {
            TrendStrength::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendStrength::Strong => "Strong",
            TrendStrength::Moderate => "Moderate",
            TrendStrength::Weak => "Weak",
            TrendStrength::Unknown => "Unknown",
        }
    }
}

/// Whether the latest bar traded unusually heavy volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VolumeSpike {
    High,
    Normal,
    #[default]
    Unknown,
}

impl VolumeSpike {
    pub fn label(&self) -> &'static str {
        match self {
            VolumeSpike::High => "High",
            VolumeSpike::Normal => "Normal",
            VolumeSpike::Unknown => "Unknown",
        }
    }
}

/// A single entry of the signal breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalValue {
    /// Directional strength in [-2, 2].
    Direction(i8),
    /// Categorical label (volatility, trend strength, volume spike).
    Label(&'static str),
}

impl SignalValue {
    /// Directional bias: sign of a direction, 0 for labels.
    pub fn bias(&self) -> i8 {
        match self {
            SignalValue::Direction(d) => d.signum(),
            SignalValue::Label(_) => 0,
        }
    }
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalValue::Direction(d) => write!(f, "{:+}", d),
            SignalValue::Label(l) => f.write_str(l),
        }
    }
}

/// Moving-average signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrendSignals {
    #[serde(rename = "SMA_Crossover")]
    pub sma_crossover: i8,
    #[serde(rename = "Price_vs_SMA20")]
    pub price_vs_sma20: i8,
    #[serde(rename = "EMA_Alignment")]
    pub ema_alignment: i8,
}

/// Oscillator signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MomentumSignals {
    #[serde(rename = "RSI")]
    pub rsi: i8,
    #[serde(rename = "MACD")]
    pub macd: i8,
    #[serde(rename = "Stochastic")]
    pub stochastic: i8,
    #[serde(rename = "CCI")]
    pub cci: i8,
    #[serde(rename = "Williams_R")]
    pub williams_r: i8,
    #[serde(rename = "MFI")]
    pub mfi: i8,
}

/// Band position and volatility regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VolatilitySignals {
    #[serde(rename = "Bollinger_Bands")]
    pub bollinger_bands: i8,
    #[serde(rename = "Volatility")]
    pub volatility: VolatilityLevel,
}

/// Volume confirmation signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VolumeSignals {
    #[serde(rename = "OBV")]
    pub obv: i8,
    #[serde(rename = "Volume_Spike")]
    pub volume_spike: VolumeSpike,
    #[serde(rename = "VWAP")]
    pub vwap: i8,
}

/// ADX trend strength and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrengthSignals {
    #[serde(rename = "Trend_Strength")]
    pub trend_strength: TrendStrength,
    #[serde(rename = "ADX_Direction")]
    pub adx_direction: i8,
}

/// Full per-indicator breakdown behind a recommendation.
///
/// Every analyzer owns its own fragment, so two analyzers can never write the
/// same key. Serializes as one flat object keyed by indicator name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignalMap {
    #[serde(flatten)]
    pub trend: TrendSignals,
    #[serde(flatten)]
    pub momentum: MomentumSignals,
    #[serde(flatten)]
    pub volatility: VolatilitySignals,
    #[serde(flatten)]
    pub volume: VolumeSignals,
    #[serde(flatten)]
    pub strength: StrengthSignals,
}

impl SignalMap {
    /// All entries in a stable order, keyed by their serialized names.
    pub fn entries(&self) -> Vec<(&'static str, SignalValue)> {
        use SignalValue::{Direction, Label};

        vec![
            ("SMA_Crossover", Direction(self.trend.sma_crossover)),
            ("Price_vs_SMA20", Direction(self.trend.price_vs_sma20)),
            ("EMA_Alignment", Direction(self.trend.ema_alignment)),
            ("RSI", Direction(self.momentum.rsi)),
            ("MACD", Direction(self.momentum.macd)),
            ("Stochastic", Direction(self.momentum.stochastic)),
            ("CCI", Direction(self.momentum.cci)),
            ("Williams_R", Direction(self.momentum.williams_r)),
            ("MFI", Direction(self.momentum.mfi)),
            ("Bollinger_Bands", Direction(self.volatility.bollinger_bands)),
            ("Volatility", Label(self.volatility.volatility.label())),
            ("OBV", Direction(self.volume.obv)),
            ("Volume_Spike", Label(self.volume.volume_spike.label())),
            ("VWAP", Direction(self.volume.vwap)),
            ("Trend_Strength", Label(self.strength.trend_strength.label())),
            ("ADX_Direction", Direction(self.strength.adx_direction)),
        ]
    }
}
