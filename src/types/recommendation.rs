use crate::types::SignalMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directional trading decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

impl Decision {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BUY" => Some(Decision::Buy),
            "SELL" => Some(Decision::Sell),
            "HOLD" => Some(Decision::Hold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Buy => "BUY",
            Decision::Sell => "SELL",
            Decision::Hold => "HOLD",
        }
    }

    /// BUY and SELL are actionable, HOLD is not.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Decision::Hold)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Caller-supplied leveraged position parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfdParameters {
    /// Capital posted as margin, must be positive.
    pub margin: f64,
    /// Leverage multiplier, 1 = unleveraged.
    pub leverage: f64,
    /// Position size in units of the instrument.
    pub position_size: f64,
}

impl Default for CfdParameters {
    fn default() -> Self {
        Self {
            margin: 1000.0,
            leverage: 1.0,
            position_size: 1.0,
        }
    }
}

impl CfdParameters {
    /// Check the parameter domain. Returns a description of the first violation.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.margin.is_finite() && self.margin > 0.0) {
            return Err(format!("margin must be positive, got {}", self.margin));
        }
        if !(self.leverage.is_finite() && self.leverage >= 0.0) {
            return Err(format!("leverage must be non-negative, got {}", self.leverage));
        }
        if !(self.position_size.is_finite() && self.position_size > 0.0) {
            return Err(format!(
                "position size must be positive, got {}",
                self.position_size
            ));
        }
        Ok(())
    }
}

/// Profit target price levels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Targets {
    #[serde(rename = "3%")]
    pub target_3pct: f64,
    #[serde(rename = "5%")]
    pub target_5pct: f64,
    #[serde(rename = "10%")]
    pub target_10pct: f64,
}

/// Margin, leverage and P&L figures for a recommendation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfdEconomics {
    pub effective_capital: f64,
    pub required_margin: f64,
    pub profit_3pct: f64,
    pub roi_3pct: f64,
    pub profit_5pct: f64,
    pub roi_5pct: f64,
    pub profit_10pct: f64,
    pub roi_10pct: f64,
    /// Signed P&L if the stop is hit (negative for BUY and SELL).
    pub loss_at_stop: f64,
    pub roi_at_stop: f64,
    /// Diagnostic set when the recommendation is a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Weighted-sum inputs: each analyzer's unweighted partial score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryScores {
    pub trend: f64,
    pub momentum: f64,
    pub volatility: f64,
    pub volume: f64,
    pub strength: f64,
}

/// A single trading recommendation. Built fresh per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub decision: Decision,
    pub entry_price: f64,
    pub targets: Targets,
    pub stop_loss: f64,
    /// Confidence in percent, 0 to 100.
    pub confidence: f64,
    pub total_score: f64,
    pub scores: CategoryScores,
    pub signals: SignalMap,
    pub cfd: CfdEconomics,
}

impl Recommendation {
    /// Safe HOLD with every price at zero, carrying a diagnostic.
    pub fn fallback(error: impl Into<String>) -> Self {
        Self {
            decision: Decision::Hold,
            entry_price: 0.0,
            targets: Targets::default(),
            stop_loss: 0.0,
            confidence: 0.0,
            total_score: 0.0,
            scores: CategoryScores::default(),
            signals: SignalMap::default(),
            cfd: CfdEconomics {
                error: Some(error.into()),
                ..CfdEconomics::default()
            },
        }
    }

    /// True for a fallback produced by a computation fault.
    pub fn is_fallback(&self) -> bool {
        self.cfd.error.is_some()
    }
}

/// A persisted recommendation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecommendation {
    pub id: i64,
    /// Unix timestamp (milliseconds) when generated.
    pub timestamp: i64,
    pub symbol: String,
    pub signal: Decision,
    pub entry_price: f64,
    pub target_3: f64,
    pub target_5: f64,
    pub target_10: f64,
    pub stop_loss: f64,
    pub confidence: f64,
    /// Serialized SignalMap (JSON).
    pub indicators: String,
}

/// Aggregate statistics over the stored history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationStats {
    pub total: usize,
    pub buy: usize,
    pub sell: usize,
    pub hold: usize,
    /// Mean confidence, None when the store is empty.
    pub avg_confidence: Option<f64>,
}
