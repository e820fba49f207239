//! Plain-text rendering of evaluations and stored history.

use crate::error::Result;
use crate::services::signals::{Evaluation, IndicatorId};
use crate::services::RecommendationStore;
use crate::types::{Bar, Decision, RecommendationStats, SessionStats, StoredRecommendation};
use chrono::DateTime;
use std::fmt::Write;

/// Indicators shown in the detail section, grouped by heading.
const INDICATOR_GROUPS: [(&str, &[IndicatorId]); 3] = [
    (
        "Trend",
        &[
            IndicatorId::Sma20,
            IndicatorId::Sma50,
            IndicatorId::Sma200,
            IndicatorId::Ema12,
            IndicatorId::Ema26,
            IndicatorId::Adx,
        ],
    ),
    (
        "Momentum",
        &[
            IndicatorId::Rsi,
            IndicatorId::Macd,
            IndicatorId::MacdSignal,
            IndicatorId::StochK,
            IndicatorId::Cci,
            IndicatorId::WilliamsR,
            IndicatorId::Mfi,
        ],
    ),
    (
        "Volatility / Volume",
        &[
            IndicatorId::BbUpper,
            IndicatorId::BbMiddle,
            IndicatorId::BbLower,
            IndicatorId::Atr,
            IndicatorId::Obv,
            IndicatorId::Vwap,
        ],
    ),
];

fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

fn fmt_time(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Full report for one evaluated symbol.
pub fn render_evaluation(symbol: &str, bars: &[Bar], eval: &Evaluation) -> String {
    let rec = &eval.recommendation;
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===", symbol);
    if let Some(stats) = SessionStats::from_bars(bars) {
        let change = stats
            .change_pct
            .map(|c| format!("{:+.2}%", c))
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(out, "Price:  ${:.2} ({})", stats.last_close, change);
        let _ = writeln!(out, "Volume: {:.0}", stats.last_volume);
        let _ = writeln!(out, "RSI:    {}", fmt_value(eval.indicators.latest(IndicatorId::Rsi)));
        let _ = writeln!(out, "High:   ${:.2}  Low: ${:.2}", stats.high, stats.low);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Signal:     {}", rec.decision);
    if let Some(error) = &rec.cfd.error {
        let _ = writeln!(out, "Fallback:   {}", error);
    }
    let _ = writeln!(out, "Entry:      ${:.2}", rec.entry_price);
    let _ = writeln!(out, "Stop loss:  ${:.2}", rec.stop_loss);
    let _ = writeln!(out, "Confidence: {:.1}%  (score {:+.2})", rec.confidence, rec.total_score);

    if rec.decision.is_actionable() {
        let cfd = &rec.cfd;
        let _ = writeln!(out);
        let _ = writeln!(out, "Targets:");
        for (label, price, profit, roi) in [
            ("3%", rec.targets.target_3pct, cfd.profit_3pct, cfd.roi_3pct),
            ("5%", rec.targets.target_5pct, cfd.profit_5pct, cfd.roi_5pct),
            ("10%", rec.targets.target_10pct, cfd.profit_10pct, cfd.roi_10pct),
        ] {
            let _ = writeln!(
                out,
                "  {:>3}  ${:.2}  P&L {:+.2}  ROI {:+.2}%",
                label, price, profit, roi
            );
        }
        let _ = writeln!(
            out,
            "  stop ${:.2}  P&L {:+.2}  ROI {:+.2}%",
            rec.stop_loss, cfd.loss_at_stop, cfd.roi_at_stop
        );
        let _ = writeln!(
            out,
            "CFD: capital ${:.2}, required margin ${:.2}",
            cfd.effective_capital, cfd.required_margin
        );
    }

    for (heading, ids) in INDICATOR_GROUPS {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", heading);
        for id in ids {
            let _ = writeln!(out, "  {:<12} {}", id.as_str(), fmt_value(eval.indicators.latest(*id)));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Factors:");
    for (name, value) in rec.signals.entries() {
        let (mark, verdict) = match value.bias() {
            1 => ("+", "bullish".to_string()),
            -1 => ("-", "bearish".to_string()),
            _ => ("o", format!("neutral ({})", value)),
        };
        let _ = writeln!(out, "  {} {:<16} {}", mark, name, verdict);
    }

    out
}

/// One line per stored recommendation.
pub fn render_history(rows: &[StoredRecommendation]) -> String {
    if rows.is_empty() {
        return "No recommendations stored.\n".to_string();
    }

    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{}  {:<8} {:<4}  entry ${:.2}  stop ${:.2}  conf {:.1}%",
            fmt_time(row.timestamp),
            row.symbol,
            row.signal,
            row.entry_price,
            row.stop_loss,
            row.confidence
        );
    }
    out
}

/// Summary line for the stored history.
pub fn render_stats(stats: &RecommendationStats) -> String {
    let avg = stats
        .avg_confidence
        .map(|c| format!("{:.1}%", c))
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "{} stored: {} {}, {} {}, {} {}, avg confidence {}\n",
        stats.total,
        stats.buy,
        Decision::Buy,
        stats.sell,
        Decision::Sell,
        stats.hold,
        Decision::Hold,
        avg
    )
}

/// Recent history followed by the summary line, read from the store.
pub fn render_store_summary(store: &RecommendationStore, limit: usize) -> Result<String> {
    let mut out = String::from("--- Recent recommendations ---\n");
    out.push_str(&render_history(&store.recent(limit)?));
    out.push_str(&render_stats(&store.statistics()?));
    Ok(out)
}
