//! Progress reporting.
//!
//! Reporters are purely observational: nothing they do affects control flow.

use crate::error::{ContextFrame, Result};
use std::future::Future;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::{error, info, warn};

pub trait ProgressReporter: Send + Sync {
    /// A stage started.
    fn begin(&self, text: &str);
    /// One unit of work inside the current stage, e.g. `("Write types to", "generated/Token.ts")`.
    fn step(&self, subject: &str, detail: &str);
    /// A non-fatal diagnostic.
    fn warn(&self, message: &str);
    fn succeed(&self, text: &str);
    fn fail(&self, text: &str, error: &str);
}

/// Forwards progress to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn begin(&self, text: &str) {
        info!(target: "chaingen", "{text}");
    }

    fn step(&self, subject: &str, detail: &str) {
        info!(target: "chaingen", "  {subject} {detail}");
    }

    fn warn(&self, message: &str) {
        warn!(target: "chaingen", "{message}");
    }

    fn succeed(&self, text: &str) {
        info!(target: "chaingen", "✔ {text}");
    }

    fn fail(&self, text: &str, error: &str) {
        error!(target: "chaingen", "✖ {text}: {error}");
    }
}

/// One recorded progress transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Begin(String),
    Step { subject: String, detail: String },
    Warn(String),
    Succeed(String),
    Fail { text: String, error: String },
}

/// Records every transition in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<ProgressEvent>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Details of every recorded step with the given subject, in order.
    pub fn steps(&self, subject: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Step { subject: s, detail } if s == subject => Some(detail),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Warn(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl ProgressReporter for MemoryReporter {
    fn begin(&self, text: &str) {
        self.push(ProgressEvent::Begin(text.to_string()));
    }

    fn step(&self, subject: &str, detail: &str) {
        self.push(ProgressEvent::Step {
            subject: subject.to_string(),
            detail: detail.to_string(),
        });
    }

    fn warn(&self, message: &str) {
        self.push(ProgressEvent::Warn(message.to_string()));
    }

    fn succeed(&self, text: &str) {
        self.push(ProgressEvent::Succeed(text.to_string()));
    }

    fn fail(&self, text: &str, error: &str) {
        self.push(ProgressEvent::Fail {
            text: text.to_string(),
            error: error.to_string(),
        });
    }
}

/// Run `work` as one reported stage.
///
/// On failure the reporter is told, and the error is wrapped in a
/// [`ContextFrame::Stage`] carrying `failure_text`.
pub async fn with_progress<T, F>(
    reporter: &dyn ProgressReporter,
    text: &str,
    failure_text: &'static str,
    work: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    reporter.begin(text);
    match work.await {
        Ok(value) => {
            reporter.succeed(text);
            Ok(value)
        }
        Err(e) => {
            reporter.fail(failure_text, &e.to_string());
            Err(e.context(ContextFrame::Stage(failure_text)))
        }
    }
}

/// Path as shown in progress output.
pub fn display_path(path: &Path) -> String {
    path.display().to_string()
}
