use chrono::{Local, NaiveDate};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use workforce_risk::config::AppConfig;
use workforce_risk::datasets::{
    write_signal_csv, DatasetImportError, HistoryBook, SignalField, SignalImporter,
};
use workforce_risk::error::AppError;
use workforce_risk::health::{HealthAssessment, HealthEvaluator, SubScore};
use workforce_risk::risk::{write_results_csv, Component, PopulationReport, RiskEngine};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Signal table (CSV) with one row per employee
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Write the full results table (values, tiers, concern) to this CSV file
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Only list employees matching at least one intervention scenario
    #[arg(long)]
    pub(crate) flagged_only: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MergeArgs {
    /// Directory holding the raw HR dataset exports
    #[arg(long)]
    pub(crate) data_dir: PathBuf,
    /// Write the merged signal table here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Directory holding the raw HR dataset exports
    #[arg(long)]
    pub(crate) data_dir: PathBuf,
    /// Employee to assess
    #[arg(long)]
    pub(crate) employee: String,
    /// Assessment date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        output,
        flagged_only,
    } = args;

    let config = AppConfig::load()?;
    let import = SignalImporter::default().import_path(&input)?;
    let report = RiskEngine::new(config.scoring).score_population(&import.records)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_population(&mut out, &report, &import.missing_columns, flagged_only)?;

    if let Some(path) = output {
        let file = BufWriter::new(File::create(&path)?);
        write_results_csv(&report, file).map_err(DatasetImportError::from)?;
        writeln!(out, "\nResults written to {}", path.display())?;
    }

    Ok(())
}

pub(crate) fn run_merge(args: MergeArgs) -> Result<(), AppError> {
    let MergeArgs { data_dir, output } = args;

    let mut book = HistoryBook::new();
    let stats = book.ingest_dir(&data_dir)?;
    for (kind, counts) in &stats {
        eprintln!(
            "- {:?}: {} rows | {} accepted | {} skipped",
            kind, counts.rows, counts.accepted, counts.skipped
        );
    }
    eprintln!("Merged {} employees from {}", book.len(), data_dir.display());

    let records = book.signal_records();
    match output {
        Some(path) => {
            let file = BufWriter::new(File::create(&path)?);
            write_signal_csv(&records, file).map_err(DatasetImportError::from)?;
            eprintln!("Signal table written to {}", path.display());
        }
        None => {
            write_signal_csv(&records, io::stdout().lock()).map_err(DatasetImportError::from)?
        }
    }

    Ok(())
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        data_dir,
        employee,
        today,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let mut book = HistoryBook::new();
    book.ingest_dir(&data_dir)?;

    let Some(history) = book.history(employee.trim()) else {
        println!(
            "No records for employee {} in {}",
            employee.trim(),
            data_dir.display()
        );
        return Ok(());
    };

    let assessment = HealthEvaluator::default().assess(history, today);
    render_assessment(&mut io::stdout().lock(), &assessment)?;
    Ok(())
}

fn format_value(value: Option<f64>) -> String {
    value
        .map(|value| format!("{value:.3}"))
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn render_population<W: Write>(
    out: &mut W,
    report: &PopulationReport,
    missing_columns: &[SignalField],
    flagged_only: bool,
) -> io::Result<()> {
    let summary = &report.summary;
    writeln!(out, "Population risk report")?;
    writeln!(
        out,
        "- {} employees | {} flagged ({:.1}%)",
        summary.total_employees, summary.flagged_employees, summary.flagged_pct
    )?;
    if !missing_columns.is_empty() {
        let names: Vec<&str> = missing_columns.iter().map(|field| field.canonical()).collect();
        writeln!(out, "- Missing columns: {}", names.join(", "))?;
    }

    writeln!(out, "Thresholds (p25 / p75):")?;
    for component in Component::ALL {
        match report.thresholds.get(component) {
            Some(thresholds) => writeln!(
                out,
                "  - {} {}: {:.3} / {:.3}",
                component.code(),
                component.label(),
                thresholds.p25,
                thresholds.p75
            )?,
            None => writeln!(out, "  - {} {}: no data", component.code(), component.label())?,
        }
    }

    writeln!(out, "Scenario matches:")?;
    for count in summary.scenario_counts.iter().filter(|count| count.count > 0) {
        writeln!(out, "  - {}. {}: {}", count.scenario_id, count.title, count.count)?;
    }

    writeln!(out, "Employees:")?;
    for profile in report
        .employees
        .iter()
        .filter(|profile| !flagged_only || profile.flagged)
    {
        let tiers: Vec<String> = Component::ALL
            .iter()
            .map(|component| {
                let label = profile.tier(*component).label();
                let label = if label.is_empty() { "?" } else { label };
                format!("{}={}", component.code(), label)
            })
            .collect();
        writeln!(
            out,
            "  - {} | CRS {} | CRR {} | {}",
            profile.employee_id,
            format_value(Some(profile.crs)),
            format_value(Some(profile.crr)),
            tiers.join(" ")
        )?;
        if profile.flagged {
            writeln!(out, "    Concern: {}", profile.concern)?;
        }
    }

    Ok(())
}

fn render_score<W: Write>(out: &mut W, label: &str, score: &SubScore) -> io::Result<()> {
    writeln!(out, "- {}: {}/100", label, score.total)?;
    for part in &score.parts {
        let marker = if part.defaulted { " (default)" } else { "" };
        writeln!(out, "    {}: {}/{}{}", part.name, part.points, part.max, marker)?;
    }
    Ok(())
}

pub(crate) fn render_assessment<W: Write>(
    out: &mut W,
    assessment: &HealthAssessment,
) -> io::Result<()> {
    writeln!(
        out,
        "Health assessment for {} on {}",
        assessment.employee_id, assessment.assessed_on
    )?;
    render_score(out, "Morality", &assessment.morality)?;
    render_score(out, "Engagement", &assessment.engagement)?;
    render_score(out, "Retention risk", &assessment.retention_risk)?;
    render_score(out, "Culture", &assessment.culture)?;
    writeln!(
        out,
        "Health score {:.2} -> {} intervention",
        assessment.health_score,
        assessment.level.label()
    )?;
    if let Some(note) = assessment.intervention_note() {
        writeln!(out, "Note: {note}")?;
    }
    Ok(())
}
