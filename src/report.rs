//! Console reporting.
//!
//! The deploy engine only talks to the [`Reporter`] trait, so runs can be
//! tested without capturing process output.

use chrono::Local;
use colored::Colorize;

/// Fire-and-forget reporting channel. Implementations never fail and never
/// block the pipeline.
pub trait Reporter: Send + Sync {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn success(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Colored console reporter.
///
/// Informational lines print blue, warnings and errors red, successes green,
/// each prefixed with a local wall-clock timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    fn stamp() -> String {
        Local::now().format("%H:%M:%S").to_string()
    }
}

impl Reporter for ConsoleReporter {
    fn info(&self, msg: &str) {
        println!("{} {}", Self::stamp().dimmed(), msg.blue());
    }

    fn warn(&self, msg: &str) {
        println!("{} {}", Self::stamp().dimmed(), msg.red());
    }

    fn success(&self, msg: &str) {
        println!("{} {}", Self::stamp().dimmed(), msg.green());
    }

    fn error(&self, msg: &str) {
        eprintln!("{} {}", Self::stamp().dimmed(), msg.red());
    }
}
