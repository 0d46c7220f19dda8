use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::application::{AppError, EntryRef, ExpenseSession};
use crate::domain::format_money;
use crate::io::{OutputFormat, render};

use super::intro::Intro;

/// One line typed into the session.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Record an expense
    #[command(visible_alias = "a")]
    Add {
        /// Amount spent (e.g., "12.50" or "12")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// What the money was spent on
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Remove an expense
    #[command(visible_aliases = ["rm", "del"])]
    Remove {
        /// Number shown by `list`, or a full entry id
        entry: String,
    },

    /// Show the running total and all expenses
    #[command(visible_alias = "ls")]
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show the running total
    Total,

    /// Verify the running total against the entries
    Check,

    /// End the session (all expenses are discarded)
    #[command(visible_alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Next {
    Line(std::io::Result<Option<String>>),
    IntroDone(std::io::Result<()>),
}

/// Drive a session from a stream of command lines until `quit` or end of input.
///
/// A running intro is stopped, and allowed to finish the step it is printing,
/// before the first line is executed. The prompt follows the intro once it ends.
pub async fn run_session<R, W>(
    session: &mut ExpenseSession,
    input: R,
    mut out: W,
    mut intro: Option<Intro>,
    prompt: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    if prompt && intro.is_none() {
        write_prompt(&mut out)?;
    }

    loop {
        let next = match intro.as_mut() {
            Some(running) => tokio::select! {
                line = lines.next_line() => Next::Line(line),
                done = running.wait() => Next::IntroDone(done),
            },
            None => Next::Line(lines.next_line().await),
        };

        let line = match next {
            Next::IntroDone(done) => {
                intro = None;
                if let Err(err) = done {
                    warn!(error = %err, "intro failed");
                }
                if prompt {
                    write_prompt(&mut out)?;
                }
                continue;
            }
            Next::Line(line) => line.context("Failed to read command")?,
        };
        let Some(line) = line else { break };

        if let Some(running) = intro.take() {
            stop_intro(running).await;
        }
        if execute_line(session, &line, &mut out)? == Flow::Quit {
            break;
        }
        if prompt {
            write_prompt(&mut out)?;
        }
    }

    if let Some(running) = intro {
        stop_intro(running).await;
    }

    writeln!(
        out,
        "Session ended: discarded {} expense(s) totalling {}.",
        session.entries().len(),
        format_money(session.total(), &session.config().currency_symbol)
    )?;
    out.flush()?;
    Ok(())
}

async fn stop_intro(intro: Intro) {
    if let Err(err) = intro.cancel().await {
        warn!(error = %err, "intro failed");
    }
}

/// Run a single command line. Rejected input is reported and the session
/// carries on; only output failures are returned as errors.
pub fn execute_line<W: Write>(session: &mut ExpenseSession, line: &str, out: &mut W) -> Result<Flow> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Flow::Continue);
    }

    let parsed = match SessionLine::try_parse_from(line.split_whitespace()) {
        Ok(parsed) => parsed,
        Err(err) => {
            write!(out, "{}", err)?;
            return Ok(Flow::Continue);
        }
    };

    match run_command(session, parsed.command, out) {
        Ok(flow) => Ok(flow),
        Err(err) => match err.downcast::<AppError>() {
            Ok(app_err) => {
                writeln!(out, "error: {}", app_err)?;
                Ok(Flow::Continue)
            }
            Err(other) => Err(other),
        },
    }
}

fn run_command<W: Write>(
    session: &mut ExpenseSession,
    command: SessionCommand,
    out: &mut W,
) -> Result<Flow> {
    let symbol = session.config().currency_symbol.clone();

    match command {
        SessionCommand::Add {
            amount,
            description,
        } => {
            let entry = session.add(&amount, &description.join(" "))?;
            writeln!(
                out,
                "Added #{} {}: {} (total {})",
                entry.sequence,
                entry.description,
                format_money(entry.amount_cents, &symbol),
                format_money(session.total(), &symbol)
            )?;
        }

        SessionCommand::Remove { entry } => {
            let entry_ref: EntryRef = entry.parse()?;
            let removed = session.remove(&entry_ref)?;
            writeln!(
                out,
                "Removed #{} {}: {} (total {})",
                removed.sequence,
                removed.description,
                format_money(removed.amount_cents, &symbol),
                format_money(session.total(), &symbol)
            )?;
        }

        SessionCommand::List { format } => {
            render(&session.summary(), format, &mut *out)?;
        }

        SessionCommand::Total => {
            writeln!(
                out,
                "Total: {} across {} expense(s)",
                format_money(session.total(), &symbol),
                session.entries().len()
            )?;
        }

        SessionCommand::Check => {
            let report = session.check()?;
            writeln!(out, "Entries:        {}", report.entry_count)?;
            writeln!(
                out,
                "Running total:  {}",
                format_money(report.stored_total, &symbol)
            )?;
            writeln!(
                out,
                "Sum of entries: {}",
                format_money(report.computed_total, &symbol)
            )?;
            writeln!(out, "Ledger is consistent.")?;
        }

        SessionCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn write_prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}
