use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;

use crate::application::SessionSummary;
use crate::domain::{format_cents, format_money};

/// Placeholder shown instead of the entry list when the ledger is empty.
pub const EMPTY_PLACEHOLDER: &str = "No expenses added yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Write a session summary in the requested format.
pub fn render<W: Write>(summary: &SessionSummary, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Table => render_table(summary, writer),
        OutputFormat::Json => render_json(summary, writer),
        OutputFormat::Csv => render_csv(summary, writer).map(|_| ()),
    }
}

/// The expense card followed by the entry list.
pub fn render_table<W: Write>(summary: &SessionSummary, mut writer: W) -> Result<()> {
    writeln!(writer, "{:<30} {:>12}", "Expenses", summary.date)?;
    writeln!(
        writer,
        "{}",
        format_money(summary.total_cents, &summary.currency)
    )?;
    writeln!(writer)?;

    if summary.entries.is_empty() {
        writeln!(writer, "{}", EMPTY_PLACEHOLDER)?;
        return Ok(());
    }

    writeln!(writer, "{:>4}  {:<30} {:>12}", "#", "DESCRIPTION", "AMOUNT")?;
    writeln!(writer, "{}", "-".repeat(48))?;
    for entry in &summary.entries {
        writeln!(
            writer,
            "{:>4}  {:<30} {:>12}",
            entry.sequence,
            truncate(&entry.description, 30),
            format_money(entry.amount_cents, &summary.currency)
        )?;
    }
    Ok(())
}

pub fn render_json<W: Write>(summary: &SessionSummary, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// One row per entry. Returns the number of rows written.
pub fn render_csv<W: Write>(summary: &SessionSummary, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "id",
        "sequence",
        "recorded_at",
        "amount",
        "amount_cents",
        "description",
    ])?;

    let mut count = 0;
    for entry in &summary.entries {
        csv_writer.write_record(&[
            entry.id.to_string(),
            entry.sequence.to_string(),
            entry.recorded_at.to_rfc3339(),
            format_cents(entry.amount_cents),
            entry.amount_cents.to_string(),
            entry.description.clone(),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
