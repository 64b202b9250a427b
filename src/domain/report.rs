//! Plain-text market analysis report.

use crate::domain::indicator::IndicatorTable;
use crate::domain::price_series::PriceSeries;
use crate::domain::risk::RiskMetrics;

const RULE_WIDTH: usize = 50;
pub const NO_DATA_MESSAGE: &str = "No data loaded.";
pub const NOT_COMPUTED_MESSAGE: &str = "Not yet computed.";

pub struct ReportContext<'a> {
    pub symbol: Option<&'a str>,
    pub series: Option<&'a PriceSeries>,
    pub indicators: Option<&'a IndicatorTable>,
    pub risk_metrics: Option<&'a RiskMetrics>,
}

pub fn render_report(ctx: &ReportContext<'_>) -> String {
    let Some(series) = ctx.series else {
        return NO_DATA_MESSAGE.to_string();
    };

    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{}\n", rule));
    out.push_str("Market Analysis Report\n");
    out.push_str(&format!("{}\n", rule));
    if let Some(symbol) = ctx.symbol {
        out.push_str(&format!("Symbol: {}\n", symbol));
    }
    out.push_str(&format!(
        "Data Period: {} to {}\n",
        series.first_date(),
        series.last_date()
    ));
    out.push_str(&format!("Total Trading Days: {}\n", series.len()));

    let summary = series.close_summary();
    out.push_str("\n--- Price Statistics ---\n");
    out.push_str(&format!("Highest Price: ${:.2}\n", summary.max));
    out.push_str(&format!("Lowest Price: ${:.2}\n", summary.min));
    out.push_str(&format!("Average Price: ${:.2}\n", summary.mean));

    out.push_str("\n--- Risk Metrics ---\n");
    match ctx.risk_metrics {
        Some(metrics) => {
            for (key, value) in metrics.entries() {
                if let Some(v) = value {
                    out.push_str(&format!("{}: {:.4}\n", key, v));
                }
            }
        }
        None => out.push_str(&format!("{}\n", NOT_COMPUTED_MESSAGE)),
    }

    out.push_str("\n--- Latest Indicators ---\n");
    match ctx.indicators.and_then(|t| t.latest().map(|row| (t.params, row))) {
        Some((params, latest)) => {
            out.push_str(&format!("Current Price: ${:.2}\n", latest.close));
            if let Some(sma) = latest.sma {
                out.push_str(&format!("{}-Day SMA: ${:.2}\n", params.sma_period, sma));
            }
            if let Some(ema) = latest.ema {
                out.push_str(&format!("{}-Day EMA: ${:.2}\n", params.ema_period, ema));
            }
            if let Some(vol) = latest.volatility {
                out.push_str(&format!("Volatility (Annualized): {:.4}\n", vol));
            }
            if let Some(momentum) = latest.momentum {
                out.push_str(&format!(
                    "{}-Day Momentum: {:.4}\n",
                    params.momentum_period, momentum
                ));
            }
        }
        None => out.push_str(&format!("{}\n", NOT_COMPUTED_MESSAGE)),
    }

    out.push_str(&format!("\n{}\n", rule));
    out
}
