// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use anyhow::Result;
use tokio::io::AsyncWrite;
use spese::application::{ExpenseSession, SessionConfig};
use spese::cli::repl::run_session;

/// Helper to create an empty session with default settings
pub fn test_session() -> ExpenseSession {
    ExpenseSession::new(SessionConfig::default())
}

/// Helper to feed a script to a session and capture everything it prints
pub async fn run_script(session: &mut ExpenseSession, script: &str) -> Result<String> {
    let mut out = Vec::new();
    run_session(session, script.as_bytes(), &mut out, None, false).await?;
    Ok(String::from_utf8(out)?)
}

/// Test fixture: the coffee-and-bus day used throughout the scenarios
pub struct StandardExpenses;

impl StandardExpenses {
    /// Record Coffee (12.50) then Bus (7.25)
    pub fn record(session: &mut ExpenseSession) -> Result<()> {
        session.add("12.50", "Coffee")?;
        session.add("7.25", "Bus")?;
        Ok(())
    }
}

/// Output sink shared by the session loop (sync writes) and the intro
/// (async writes), so tests see both in the order they happened.
#[derive(Clone, Default)]
pub struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AsyncWrite for SharedOutput {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
