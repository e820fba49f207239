//! Volume analyzer: OBV trend, volume spikes and VWAP.

use crate::services::signals::{
    exceeds, trailing_mean, Analysis, Analyzer, IndicatorId, MarketSnapshot,
};
use crate::types::{VolumeSignals, VolumeSpike};

/// Trailing window for the OBV and volume baselines.
const BASELINE_WINDOW: usize = 20;

/// Current volume above this multiple of its baseline is a spike.
const SPIKE_MULTIPLIER: f64 = 1.5;

/// Scores volume confirmation:
/// - OBV vs its 20-bar mean: +/-1
/// - Volume spike: +/-0.5 in the direction of the last close-to-close move
/// - Close vs VWAP: +/-0.5
pub struct Volume;

impl Analyzer for Volume {
    type Signals = VolumeSignals;

    const NAME: &'static str = "Volume";
    const WEIGHT: f64 = 1.2;
    const MAX_SCORE: f64 = 2.0;

    fn analyze(snapshot: &MarketSnapshot<'_>) -> Analysis<VolumeSignals> {
        let obv = snapshot
            .indicators()
            .get(IndicatorId::Obv)
            .map(|series| {
                exceeds(
                    series.last().copied().filter(|v| v.is_finite()),
                    trailing_mean(series, BASELINE_WINDOW),
                )
            })
            .unwrap_or(0);

        let volumes: Vec<f64> = snapshot.bars().iter().map(|b| b.volume).collect();
        let current_volume = volumes.last().copied().filter(|v| v.is_finite());
        let (volume_spike, nudge) = match (current_volume, trailing_mean(&volumes, BASELINE_WINDOW)) {
            (Some(current), Some(avg)) if current > avg * SPIKE_MULTIPLIER => {
                let direction = exceeds(snapshot.close(), snapshot.previous_close());
                (VolumeSpike::High, 0.5 * f64::from(direction))
            }
            (Some(_), Some(_)) => (VolumeSpike::Normal, 0.0),
            _ => (VolumeSpike::Unknown, 0.0),
        };

        let vwap = exceeds(snapshot.close(), snapshot.latest(IndicatorId::Vwap));

        let score = f64::from(obv) + nudge + 0.5 * f64::from(vwap);

        Analysis {
            score,
            signals: VolumeSignals {
                obv,
                volume_spike,
                vwap,
            },
        }
    }
}
