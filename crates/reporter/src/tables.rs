use analyzer::AssetAnalysis;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

fn pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Historical risk metrics, one row per symbol.
pub fn render_metrics_table(analyses: &[AssetAnalysis]) -> Table {
    let confidence = analyses
        .first()
        .map(|a| format!("{:.0}%", a.statistics.confidence * 100.0))
        .unwrap_or_default();
    let var_header = format!("VaR ({confidence})");
    let cvar_header = format!("CVaR ({confidence})");

    let mut table = new_table(vec![
        "Symbol",
        "Total Return",
        "Ann. Volatility",
        "Sharpe",
        "Max Drawdown",
        "Drawdown Window",
        var_header.as_str(),
        cvar_header.as_str(),
    ]);

    for a in analyses {
        let s = &a.statistics;
        table.add_row(vec![
            s.symbol.clone(),
            pct(s.total_return),
            pct(s.annualized_volatility),
            format!("{:.2}", s.sharpe_ratio),
            pct(s.max_drawdown.depth),
            format!("{} → {}", s.max_drawdown.peak_date, s.max_drawdown.trough_date),
            pct(s.value_at_risk),
            pct(s.conditional_value_at_risk),
        ]);
    }
    table
}

/// Monte Carlo terminal-price summary, one row per symbol.
pub fn render_simulation_table(analyses: &[AssetAnalysis]) -> Table {
    let mut table = new_table(vec![
        "Symbol",
        "Last Price",
        "Expected",
        "Median",
        "Downside (5%)",
        "Upside (95%)",
        "Exp. Return",
        "P(Loss)",
    ]);

    for a in analyses {
        let m = &a.summary;
        table.add_row(vec![
            a.symbol().to_string(),
            format!("{:.2}", m.initial_price),
            format!("{:.2}", m.expected_price),
            format!("{:.2}", m.median_price),
            format!("{:.2}", m.percentile_5),
            format!("{:.2}", m.percentile_95),
            pct(m.expected_return),
            pct(m.probability_of_loss),
        ]);
    }
    table
}
