//! Subcommand handlers

use anyhow::{Context, Result};
use codoc::codoc::analysis::{forest_from_snapshot, AnalysisSnapshot};
use codoc::codoc::formats::{describe, to_ai_changes, to_treeviz_str};
use codoc::{diff_forests_with, parse_outline_with, Forest};
use codoc_config::{CodocConfig, OutputFormat};
use serde_json::json;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

/// Print diagnostics; fail when a line had to be dropped.
pub fn check(config: &CodocConfig, path: &str) -> Result<ExitCode> {
    let source = read(path)?;
    let result = parse_outline_with(&source, &config.parse_options());

    match config.output.format {
        OutputFormat::Text => {
            for line in result.diagnostic_strings() {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let report = json!({
                "nodes": result.forest.len(),
                "diagnostics": &result.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    info!(path, diagnostics = result.diagnostics.len(), "checked outline");
    Ok(if result.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

pub fn tree(config: &CodocConfig, path: &str) -> Result<ExitCode> {
    let source = read(path)?;
    let result = parse_outline_with(&source, &config.parse_options());
    for diagnostic in &result.diagnostics {
        eprintln!("{}", diagnostic);
    }

    match config.output.format {
        OutputFormat::Text => {
            print!(
                "{}",
                to_treeviz_str(&result.forest, config.output.show_line_numbers)
            );
        }
        OutputFormat::Json => {
            let nodes: Vec<_> = result
                .forest
                .preorder()
                .into_iter()
                .map(|id| &result.forest[id])
                .collect();
            println!("{}", serde_json::to_string_pretty(&nodes)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn diff(config: &CodocConfig, old_path: &str, new_path: &str) -> Result<ExitCode> {
    let old = load_forest(config, old_path)?;
    let new = load_forest(config, new_path)?;
    let diff = diff_forests_with(&old, &new, &config.diff_options());
    debug!(changes = diff.total_changes(), "diffed inputs");

    match config.output.format {
        OutputFormat::Text => {
            if diff.is_empty() {
                println!("No structural changes");
            }
            for line in describe(&diff) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let changes = to_ai_changes(&diff, chrono::Utc::now());
            println!("{}", serde_json::to_string_pretty(&changes)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Outline text, or a scanner snapshot when the file is `.json`.
fn load_forest(config: &CodocConfig, path: &str) -> Result<Forest> {
    let source = read(path)?;
    let is_snapshot = Path::new(path)
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

    if is_snapshot {
        let snapshot: AnalysisSnapshot = serde_json::from_str(&source)
            .with_context(|| format!("{} is not a valid analysis snapshot", path))?;
        return Ok(forest_from_snapshot(&snapshot));
    }

    let result = parse_outline_with(&source, &config.parse_options());
    for diagnostic in &result.diagnostics {
        eprintln!("{}: {}", path, diagnostic);
    }
    Ok(result.forest)
}

fn read(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
}
