//! Progress reporting for conversion runs.
//!
//! The pipeline never prints directly. It hands [`LogEntry`] values to a
//! [`LogSink`], which decides whether and how they are shown.

use std::cell::RefCell;

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Number of leading spaces (for nested progress)
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Render the entry as a single console line.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info | LogLevel::Success => "",
            LogLevel::Error => "❌ ",
        };
        format!("{}{}{}", " ".repeat(self.indent as usize), prefix, self.message)
    }
}

/// Receives progress entries from the pipeline.
pub trait LogSink {
    fn log(&self, entry: LogEntry);

    fn info(&self, msg: impl Into<String>, indent: u8)
    where
        Self: Sized,
    {
        self.log(LogEntry::info(msg).with_indent(indent));
    }

    fn success(&self, msg: impl Into<String>, indent: u8)
    where
        Self: Sized,
    {
        self.log(LogEntry::success(msg).with_indent(indent));
    }
}

/// Prints entries to stdout unless silenced.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    silent: bool,
}

impl ConsoleSink {
    pub fn new(silent: bool) -> Self {
        Self { silent }
    }
}

impl LogSink for ConsoleSink {
    fn log(&self, entry: LogEntry) {
        if !self.silent {
            println!("{}", entry.render());
        }
    }
}

/// Collects entries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Recorded messages without level or indentation.
    pub fn messages(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|e| e.message.clone()).collect()
    }
}

impl LogSink for MemorySink {
    fn log(&self, entry: LogEntry) {
        self.entries.borrow_mut().push(entry);
    }
}
