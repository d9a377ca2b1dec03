use crate::error::ReportError;
use crate::report::RiskReport;
use analytics::{drawdown_series, rebase};
use analyzer::AssetAnalysis;
use simulator::SimulationResult;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_FILE: &str = "risk_report.json";

/// Writes the report document to `{dir}/risk_report.json`.
pub fn write_json_report(dir: &Path, report: &RiskReport) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(REPORT_FILE);
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json)?;
    tracing::info!(path = %path.display(), "Wrote risk report.");
    Ok(path)
}

/// Writes up to `max_paths` simulated paths to `{dir}/{symbol}_paths.csv`.
///
/// One row per day: `day`, then one column per path. Day 0 is the initial price.
pub fn write_paths_csv(
    dir: &Path,
    symbol: &str,
    result: &SimulationResult,
    max_paths: usize,
) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{symbol}_paths.csv"));
    let shown = max_paths.min(result.num_simulations());
    let mut writer = csv::Writer::from_path(&path)?;

    let mut header = vec!["day".to_string()];
    header.extend((0..shown).map(|i| format!("path_{i}")));
    writer.write_record(&header)?;

    let initial = result.initial_price().to_string();
    let mut row = vec!["0".to_string()];
    row.extend(std::iter::repeat_n(initial, shown));
    writer.write_record(&row)?;

    let paths = result.paths();
    for day in 0..result.horizon_days() {
        let mut row = Vec::with_capacity(shown + 1);
        row.push((day + 1).to_string());
        row.extend((0..shown).map(|i| paths[[i, day]].to_string()));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(path)
}

/// Writes `{dir}/{symbol}_history.csv` with the close, the close rebased to 100
/// and the drawdown from the running peak for every date.
pub fn write_history_csv(dir: &Path, analysis: &AssetAnalysis) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}_history.csv", analysis.symbol()));
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["date", "close", "rebased", "drawdown"])?;

    let rebased = rebase(&analysis.series, 100.0);
    let drawdowns = drawdown_series(&analysis.series);
    for ((point, (_, rebased)), (_, drawdown)) in analysis.series.points().iter().zip(rebased).zip(drawdowns) {
        writer.write_record([
            point.date.to_string(),
            point.close.to_string(),
            rebased.to_string(),
            drawdown.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(path)
}
