//! Process command - draft an expense from a single receipt file.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::{debug, info};

use tripdraft_core::{ExpenseDraft, IngestReport};

use super::{ingest_upload, load_config, upload_name};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Declared media type (default: guessed from the file extension)
    #[arg(short, long)]
    media_type: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Include page provenance in the output
    #[arg(long)]
    show_provenance: bool,

    /// Give up on ingestion after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = Arc::new(load_config(config_path)?);

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message("Reading receipt...");

    let data = fs::read(&args.input)?;

    pb.set_message("Drafting expense...");
    let report = ingest_upload(
        data,
        upload_name(&args.input),
        args.media_type.clone(),
        config,
        args.timeout_secs.map(Duration::from_secs),
    )
    .await;
    pb.finish_and_clear();
    let report = report?;

    let output = format_report(&report, args.format, args.show_provenance)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render an ingestion report in the requested format.
pub fn format_report(
    report: &IngestReport,
    format: OutputFormat,
    show_provenance: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let envelope = if show_provenance {
                json!({
                    "draft": report.draft,
                    "media_type": report.media_type,
                    "text_chars": report.text_chars,
                    "provenance": report.provenance,
                })
            } else {
                json!({ "draft": report.draft })
            };
            Ok(serde_json::to_string(&envelope)?)
        }
        OutputFormat::Csv => format_csv(&report.draft),
        OutputFormat::Text => Ok(format_text(report, show_provenance)),
    }
}

fn opt_to_string<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn format_csv(draft: &ExpenseDraft) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "vendor",
        "date",
        "end_date",
        "currency",
        "subtotal",
        "taxes_fees",
        "total",
        "nights",
        "category",
    ])?;

    wtr.write_record([
        opt_to_string(&draft.vendor),
        opt_to_string(&draft.date),
        opt_to_string(&draft.end_date),
        opt_to_string(&draft.currency),
        opt_to_string(&draft.subtotal),
        opt_to_string(&draft.taxes_fees),
        opt_to_string(&draft.total),
        opt_to_string(&draft.nights),
        opt_to_string(&draft.category),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &IngestReport, show_provenance: bool) -> String {
    let draft = &report.draft;
    let currency = draft.currency.as_deref().unwrap_or_default();
    let mut output = String::new();

    let or_dash = |value: String| if value.is_empty() { "-".to_string() } else { value };

    output.push_str(&format!("Vendor:   {}\n", or_dash(opt_to_string(&draft.vendor))));
    output.push_str(&format!(
        "Stay:     {} to {}\n",
        or_dash(opt_to_string(&draft.date)),
        or_dash(opt_to_string(&draft.end_date))
    ));
    output.push_str(&format!("Nights:   {}\n", or_dash(opt_to_string(&draft.nights))));
    output.push('\n');

    output.push_str("Amounts:\n");
    output.push_str(&format!(
        "  Subtotal: {} {}\n",
        or_dash(opt_to_string(&draft.subtotal)),
        currency
    ));
    output.push_str(&format!(
        "  Taxes:    {} {}\n",
        or_dash(opt_to_string(&draft.taxes_fees)),
        currency
    ));
    output.push_str(&format!(
        "  Total:    {} {}\n",
        or_dash(opt_to_string(&draft.total)),
        currency
    ));
    output.push('\n');

    output.push_str(&format!("Category: {}\n", or_dash(opt_to_string(&draft.category))));

    let missing = draft.missing_fields();
    if !missing.is_empty() {
        output.push_str(&format!("Missing:  {}\n", missing.join(", ")));
    }

    if show_provenance {
        output.push_str(&format!(
            "\nSource: {} ({} chars of text)\n",
            report.media_type, report.text_chars
        ));
        for record in &report.provenance {
            output.push_str(&format!(
                "  page {} ({:?}, score {:.2})\n",
                record.page, record.source, record.score
            ));
        }
    }

    output
}
