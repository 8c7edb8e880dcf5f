//! Diagnostics sink port.
//!
//! Components report progress and recovered faults through this trait,
//! which is passed in explicitly. The core never touches a global logger.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Warn => write!(f, "WARN"),
        }
    }
}

pub trait DiagnosticsPort {
    fn event(&self, level: Level, component: &str, message: &str);

    fn debug(&self, component: &str, message: &str) {
        self.event(Level::Debug, component, message);
    }

    fn info(&self, component: &str, message: &str) {
        self.event(Level::Info, component, message);
    }

    fn warn(&self, component: &str, message: &str) {
        self.event(Level::Warn, component, message);
    }
}

/// Sink that drops every event.
pub struct NoDiagnostics;

impl DiagnosticsPort for NoDiagnostics {
    fn event(&self, _level: Level, _component: &str, _message: &str) {}
}
