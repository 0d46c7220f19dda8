use std::io;
use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::application::SessionSummary;
use crate::domain::format_money;
use crate::io::EMPTY_PLACEHOLDER;

/// One beat of the entrance banner: wait, then print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroStep {
    pub delay: Duration,
    pub lines: Vec<String>,
}

/// Greeting, then the expense card, then the (empty) list and input hint.
pub fn entrance_steps(summary: &SessionSummary) -> Vec<IntroStep> {
    vec![
        IntroStep {
            delay: Duration::from_millis(800),
            lines: vec!["Welcome back".to_string(), String::new()],
        },
        IntroStep {
            delay: Duration::from_millis(500),
            lines: vec![
                format!("{:<30} {:>12}", "Expenses", summary.date),
                format_money(summary.total_cents, &summary.currency),
                String::new(),
            ],
        },
        IntroStep {
            delay: Duration::from_millis(600),
            lines: vec![
                EMPTY_PLACEHOLDER.to_string(),
                "Type `add <amount> <description>` to record an expense, `help` for all commands."
                    .to_string(),
            ],
        },
    ]
}

/// Play the steps in order until `stop` resolves.
///
/// `stop` is only checked while waiting between steps, so a step that has
/// started printing is always written and flushed in full.
pub async fn play<W, S>(steps: Vec<IntroStep>, mut out: W, stop: S) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    tokio::pin!(stop);
    for step in steps {
        tokio::select! {
            _ = tokio::time::sleep(step.delay) => {}
            _ = &mut stop => break,
        }
        for line in &step.lines {
            out.write_all(line.as_bytes()).await?;
            out.write_all(b"\n").await?;
        }
        out.flush().await?;
    }
    Ok(())
}

/// A banner playing in the background. It never touches the ledger and can
/// be cut short between steps. Dropping it stops the banner too.
pub struct Intro {
    handle: JoinHandle<io::Result<()>>,
    stop: oneshot::Sender<()>,
}

impl Intro {
    pub fn spawn<W>(steps: Vec<IntroStep>, out: W) -> Self
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (stop, stopped) = oneshot::channel();
        let stopped = async move {
            let _ = stopped.await;
        };
        Self {
            handle: tokio::spawn(play(steps, out, stopped)),
            stop,
        }
    }

    /// Stop the banner and wait until it has flushed whatever it printed,
    /// so nothing from it can show up after this returns.
    pub async fn cancel(self) -> io::Result<()> {
        let Intro { handle, stop } = self;
        let _ = stop.send(());
        handle.await.map_err(io::Error::other)?
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the banner to end. Must not be called again once it returned.
    pub async fn wait(&mut self) -> io::Result<()> {
        (&mut self.handle).await.map_err(io::Error::other)?
    }
}
