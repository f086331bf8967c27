//! Handles all user-facing output for the harness.
//!
//! Instead of a global logger, every component writes through a [`Logger`] that
//! routes messages by category and drops whatever the CLI flags disabled. The
//! sink behind the logger is swappable: stdout with color for the CLI,
//! a string buffer for tests and programmatic capture.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// The five output categories, one per disable flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    /// General user logs.
    Log,
    /// Harness errors (aborted suites, fixture problems, deprecations).
    Error,
    /// Test headers, suite banners, and failure alerts.
    Test,
    /// Per-assertion failure messages.
    Assert,
    /// The final results block.
    Result,
}

/// Which categories are emitted. Everything is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFilter {
    pub log: bool,
    pub error: bool,
    pub test: bool,
    pub assert: bool,
    pub result: bool,
}

impl Default for LogFilter {
    fn default() -> Self {
        LogFilter {
            log: true,
            error: true,
            test: true,
            assert: true,
            result: true,
        }
    }
}

impl LogFilter {
    /// Everything off except the results block.
    pub fn only_results() -> Self {
        LogFilter {
            log: false,
            error: false,
            test: false,
            assert: false,
            result: true,
        }
    }

    /// Everything off. Handy when exercising the harness itself.
    pub fn silent() -> Self {
        LogFilter {
            log: false,
            error: false,
            test: false,
            assert: false,
            result: false,
        }
    }

    pub fn allows(&self, category: LogCategory) -> bool {
        match category {
            LogCategory::Log => self.log,
            LogCategory::Error => self.error,
            LogCategory::Test => self.test,
            LogCategory::Assert => self.assert,
            LogCategory::Result => self.result,
        }
    }
}

/// Destination for log lines.
pub trait LogSink {
    fn emit(&self, category: LogCategory, text: &str);
}

/// StdoutSink: writes to stdout, colorized by category when attached to a tty.
pub struct StdoutSink {
    choice: ColorChoice,
}

impl StdoutSink {
    pub fn new() -> Self {
        let choice = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        StdoutSink { choice }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        StdoutSink::new()
    }
}

impl LogSink for StdoutSink {
    fn emit(&self, category: LogCategory, text: &str) {
        let mut stdout = StandardStream::stdout(self.choice);
        let color = match category {
            LogCategory::Error | LogCategory::Assert => Some(Color::Red),
            LogCategory::Test => Some(Color::Yellow),
            LogCategory::Result => Some(Color::Cyan),
            LogCategory::Log => None,
        };
        if let Some(color) = color {
            let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)));
        }
        let _ = writeln!(stdout, "{}", text);
        let _ = stdout.reset();
    }
}

/// BufferSink: collects output into a shared String for testing or
/// programmatic capture.
pub struct BufferSink {
    buffer: Rc<RefCell<String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        BufferSink {
            buffer: Rc::default(),
        }
    }

    /// A handle to the buffer that stays readable after the sink moves into a
    /// [`Logger`].
    pub fn handle(&self) -> Rc<RefCell<String>> {
        Rc::clone(&self.buffer)
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        BufferSink::new()
    }
}

impl LogSink for BufferSink {
    fn emit(&self, _category: LogCategory, text: &str) {
        let mut buffer = self.buffer.borrow_mut();
        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(text);
    }
}

/// Category-routing logger: filter in front, sink behind.
pub struct Logger {
    filter: LogFilter,
    sink: Box<dyn LogSink>,
}

impl Logger {
    pub fn new(filter: LogFilter, sink: Box<dyn LogSink>) -> Self {
        Logger { filter, sink }
    }

    pub fn stdout(filter: LogFilter) -> Self {
        Logger::new(filter, Box::new(StdoutSink::new()))
    }

    fn emit(&self, category: LogCategory, text: &str) {
        if self.filter.allows(category) {
            self.sink.emit(category, text);
        }
    }

    pub fn log(&self, text: &str) {
        self.emit(LogCategory::Log, text);
    }

    pub fn log_error(&self, text: &str) {
        self.emit(LogCategory::Error, text);
    }

    pub fn log_test(&self, text: &str) {
        self.emit(LogCategory::Test, text);
    }

    pub fn log_assert(&self, text: &str) {
        self.emit(LogCategory::Assert, text);
    }

    pub fn log_result(&self, text: &str) {
        self.emit(LogCategory::Result, text);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}
