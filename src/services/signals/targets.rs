//! Profit targets, stop-loss and CFD economics.

use crate::types::{CfdEconomics, CfdParameters, Decision, Targets};

const LONG_TARGETS: [f64; 3] = [1.03, 1.05, 1.10];
const LONG_STOP: f64 = 0.98;
const SHORT_TARGETS: [f64; 3] = [0.97, 0.95, 0.90];
const SHORT_STOP: f64 = 1.02;

/// Price levels and position economics for one decision.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TargetPlan {
    pub targets: Targets,
    pub stop_loss: f64,
    pub cfd: CfdEconomics,
}

/// Derive targets, stop and CFD figures. HOLD yields an all-zero plan.
pub fn calculate_targets(decision: Decision, entry_price: f64, params: &CfdParameters) -> TargetPlan {
    let (factors, stop_factor, direction) = match decision {
        Decision::Buy => (LONG_TARGETS, LONG_STOP, 1.0),
        Decision::Sell => (SHORT_TARGETS, SHORT_STOP, -1.0),
        Decision::Hold => return TargetPlan::default(),
    };

    let [t3, t5, t10] = factors.map(|f| entry_price * f);
    let stop_loss = entry_price * stop_factor;

    // Zero leverage is treated as unleveraged for the margin requirement.
    let divisor = if params.leverage == 0.0 { 1.0 } else { params.leverage };

    let profit = |level: f64| direction * (level - entry_price) * params.position_size * params.leverage;
    let roi = |profit: f64| 100.0 * profit / params.margin;

    let (profit_3pct, profit_5pct, profit_10pct) = (profit(t3), profit(t5), profit(t10));
    let loss_at_stop = profit(stop_loss);

    TargetPlan {
        targets: Targets {
            target_3pct: t3,
            target_5pct: t5,
            target_10pct: t10,
        },
        stop_loss,
        cfd: CfdEconomics {
            effective_capital: params.margin * params.leverage,
            required_margin: entry_price * params.position_size / divisor,
            profit_3pct,
            roi_3pct: roi(profit_3pct),
            profit_5pct,
            roi_5pct: roi(profit_5pct),
            profit_10pct,
            roi_10pct: roi(profit_10pct),
            loss_at_stop,
            roi_at_stop: roi(loss_at_stop),
            error: None,
        },
    }
}
