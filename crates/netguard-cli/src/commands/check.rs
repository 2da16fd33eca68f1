use std::path::{Path, PathBuf};

use indicatif::{ParallelProgressIterator, ProgressBar};
use netguard_effects::{check_unit, EffectRegistry, Finding, ScanOptions, RULE_DESCRIPTION, RULE_ID, RULE_SET_ID};
use netguard_source::{render_plain, SourceFile};
use rayon::prelude::*;
use serde::Serialize;

use crate::commands::{load_config, search_start};
use crate::error::CliError;
use crate::io::{discover_units, load_unit};

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One rendered diagnostic per finding
    #[default]
    Human,
    /// A single JSON document
    Json,
}

/// Totals of a `check` run, mapped to the exit code by `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    pub units: usize,
    pub findings: usize,
    pub failed: usize,
}

/// The result of checking one unit file.
#[derive(Debug)]
pub struct UnitReport {
    pub file: PathBuf,
    pub source: SourceFile,
    pub findings: Vec<Finding>,
}

pub fn handle_check(
    paths: Vec<PathBuf>,
    config: Option<PathBuf>,
    format: OutputFormat,
) -> Result<CheckOutcome, CliError> {
    let config = load_config(config.as_deref(), &search_start(&paths))?;
    let registry = EffectRegistry::from_config(&config.effects);
    let options = ScanOptions::from_config(&config.scan);

    let files = discover_units(&paths)?;
    if files.is_empty() {
        return Err(CliError::NoUnits { paths });
    }

    let progress = if format == OutputFormat::Human && files.len() > 1 {
        ProgressBar::new(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    let results = analyse(&files, &registry, &options, progress.clone());
    progress.finish_and_clear();

    let mut reports = Vec::with_capacity(results.len());
    let mut failed = 0;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                failed += 1;
                eprintln!("{:?}", miette::Report::new(err));
            }
        }
    }

    let outcome = CheckOutcome {
        units: reports.len(),
        findings: reports.iter().map(|report| report.findings.len()).sum(),
        failed,
    };
    match format {
        OutputFormat::Human => print_human(&reports, outcome),
        OutputFormat::Json => println!("{}", render_json(&reports)?),
    }
    Ok(outcome)
}

/// Checks every file in parallel. Results come back in the order of `files`.
pub fn analyse(
    files: &[PathBuf],
    registry: &EffectRegistry,
    options: &ScanOptions,
    progress: ProgressBar,
) -> Vec<Result<UnitReport, CliError>> {
    files
        .par_iter()
        .progress_with(progress)
        .map(|file| check_file(file, registry, options))
        .collect()
}

fn check_file(file: &Path, registry: &EffectRegistry, options: &ScanOptions) -> Result<UnitReport, CliError> {
    let document = load_unit(file)?;
    let findings = check_unit(&document.unit, registry, &document.bindings, options);
    Ok(UnitReport {
        file: file.to_path_buf(),
        source: document.unit.source_file(),
        findings,
    })
}

fn print_human(reports: &[UnitReport], outcome: CheckOutcome) {
    for report in reports {
        for finding in &report.findings {
            println!("{}", render_plain(&finding.to_diagnostic(&report.source)));
        }
    }
    println!(
        "{RULE_DESCRIPTION}: {} finding(s) in {} unit(s){}",
        outcome.findings,
        outcome.units,
        if outcome.failed > 0 {
            format!(", {} unit(s) failed to load", outcome.failed)
        } else {
            String::new()
        }
    );
}

#[derive(Serialize)]
struct JsonReport<'a> {
    rule_set: &'static str,
    rule: &'static str,
    description: &'static str,
    findings: Vec<&'a Finding>,
}

pub fn render_json(reports: &[UnitReport]) -> Result<String, CliError> {
    let document = JsonReport {
        rule_set: RULE_SET_ID,
        rule: RULE_ID,
        description: RULE_DESCRIPTION,
        findings: reports.iter().flat_map(|report| &report.findings).collect(),
    };
    serde_json::to_string_pretty(&document)
        .map_err(|e| CliError::InternalError(format!("Failed to serialize findings: {e}")))
}
