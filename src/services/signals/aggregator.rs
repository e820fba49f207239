//! Weighted aggregation of the analyzer scores into a decision.

use super::analyzers::{Momentum, Strength, Trend, Volatility, Volume};
use super::targets::calculate_targets;
use super::{Analyzer, MarketSnapshot};
use crate::types::{CategoryScores, CfdParameters, Decision, Recommendation, SignalMap};
use thiserror::Error;

/// Upper bound of the weighted score sum, from each analyzer's ceiling.
pub const MAX_POSSIBLE_SCORE: f64 = Trend::WEIGHT * Trend::MAX_SCORE
    + Momentum::WEIGHT * Momentum::MAX_SCORE
    + Volatility::WEIGHT * Volatility::MAX_SCORE
    + Volume::WEIGHT * Volume::MAX_SCORE
    + Strength::WEIGHT * Strength::MAX_SCORE;

/// Total score above which the decision is BUY (and below whose negation, SELL).
pub const DECISION_THRESHOLD: f64 = 5.0;

/// Unexpected fault while building a recommendation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationFault {
    #[error("no finite entry price in bar series")]
    MissingEntryPrice,

    #[error("invalid CFD parameters: {0}")]
    InvalidParameters(String),

    #[error("non-finite {0} score")]
    NonFiniteScore(&'static str),
}

/// Confidence in percent for a total score.
pub fn confidence(total_score: f64) -> f64 {
    if total_score.is_nan() {
        return 0.0;
    }
    (100.0 * total_score.abs() / MAX_POSSIBLE_SCORE).min(100.0)
}

/// Map a total score to a decision.
pub fn decide(total_score: f64) -> Decision {
    if total_score > DECISION_THRESHOLD {
        Decision::Buy
    } else if total_score < -DECISION_THRESHOLD {
        Decision::Sell
    } else {
        Decision::Hold
    }
}

fn checked(name: &'static str, score: f64) -> Result<f64, ComputationFault> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(ComputationFault::NonFiniteScore(name))
    }
}

/// Run all analyzers over the snapshot and build the full recommendation.
pub fn aggregate(
    snapshot: &MarketSnapshot<'_>,
    params: &CfdParameters,
) -> Result<Recommendation, ComputationFault> {
    params
        .validate()
        .map_err(ComputationFault::InvalidParameters)?;
    let entry_price = snapshot
        .close()
        .ok_or(ComputationFault::MissingEntryPrice)?;

    let trend = Trend::analyze(snapshot);
    let momentum = Momentum::analyze(snapshot);
    let volatility = Volatility::analyze(snapshot);
    let volume = Volume::analyze(snapshot);
    let strength = Strength::analyze(snapshot);

    let scores = CategoryScores {
        trend: checked(Trend::NAME, trend.score)?,
        momentum: checked(Momentum::NAME, momentum.score)?,
        volatility: checked(Volatility::NAME, volatility.score)?,
        volume: checked(Volume::NAME, volume.score)?,
        strength: checked(Strength::NAME, strength.score)?,
    };

    let total_score = Trend::WEIGHT * scores.trend
        + Momentum::WEIGHT * scores.momentum
        + Volatility::WEIGHT * scores.volatility
        + Volume::WEIGHT * scores.volume
        + Strength::WEIGHT * scores.strength;
    let total_score = checked("total", total_score)?;

    let decision = decide(total_score);
    let plan = calculate_targets(decision, entry_price, params);

    Ok(Recommendation {
        decision,
        entry_price,
        targets: plan.targets,
        stop_loss: plan.stop_loss,
        confidence: confidence(total_score),
        total_score,
        scores,
        signals: SignalMap {
            trend: trend.signals,
            momentum: momentum.signals,
            volatility: volatility.signals,
            volume: volume.signals,
            strength: strength.signals,
        },
        cfd: plan.cfd,
    })
}
