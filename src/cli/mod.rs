use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::fs::File;
use tokio::io::BufReader;

use crate::application::{ExpenseSession, SessionConfig};
use crate::telemetry;

pub mod intro;
pub mod repl;

use intro::{Intro, entrance_steps};
use repl::run_session;

/// Spese - track what you spend, one session at a time
#[derive(Parser, Debug)]
#[command(name = "spese")]
#[command(about = "Record expenses, keep a running total, remove mistakes. Nothing is saved.")]
#[command(version)]
pub struct Cli {
    /// Currency symbol shown in front of amounts
    #[arg(short, long, default_value = "₹")]
    pub currency: String,

    /// Read commands from a file instead of standard input
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Skip the entrance banner
    #[arg(long)]
    pub no_intro: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            currency_symbol: self.currency.clone(),
        }
    }

    pub async fn run(self) -> Result<()> {
        telemetry::init(self.verbose);

        let mut session = ExpenseSession::new(self.session_config());
        let stdout = std::io::stdout();

        match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .await
                    .with_context(|| format!("Failed to open script '{}'", path.display()))?;
                run_session(&mut session, BufReader::new(file), stdout, None, false).await
            }
            None => {
                let intro = (!self.no_intro)
                    .then(|| Intro::spawn(entrance_steps(&session.summary()), tokio::io::stdout()));
                run_session(
                    &mut session,
                    BufReader::new(tokio::io::stdin()),
                    stdout,
                    intro,
                    true,
                )
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["spese"]).unwrap();

        assert_eq!(cli.currency, "₹");
        assert!(cli.script.is_none());
        assert!(!cli.no_intro);
        assert!(!cli.verbose);
        assert_eq!(cli.session_config(), SessionConfig::default());
    }

    #[test]
    fn test_options() {
        let cli =
            Cli::try_parse_from(["spese", "-c", "€", "--script", "week.txt", "--no-intro", "-v"])
                .unwrap();

        assert_eq!(cli.session_config().currency_symbol, "€");
        assert_eq!(cli.script, Some(PathBuf::from("week.txt")));
        assert!(cli.no_intro);
        assert!(cli.verbose);
    }
}
