// Wed Jan 15 2026 - Alex

use crate::diagnostics::{LineLookup, Severity, SourceLocator};
use parking_lot::Mutex;
use regex::Regex;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: PathBuf,
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}: {}", self.file.display(), self.line, self.severity, self.message)
    }
}

/// Writes findings to the diagnostic stream, one line each.
///
/// Every emitted diagnostic is also kept so the run can be summarised.
/// Writes to the sink are serialised.
pub struct DiagnosticEmitter {
    locator: SourceLocator,
    marker: String,
    sink: Mutex<Box<dyn Write + Send>>,
    emitted: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticEmitter {
    pub fn new(locator: SourceLocator, marker: &str, sink: Box<dyn Write + Send>) -> Self {
        Self {
            locator,
            marker: marker.to_string(),
            sink: Mutex::new(sink),
            emitted: Mutex::new(Vec::new()),
        }
    }

    pub fn stderr(locator: SourceLocator, marker: &str) -> Self {
        Self::new(locator, marker, Box::new(io::stderr()))
    }

    /// Emitter that only records; used where the stream itself is not wanted.
    pub fn recording(locator: SourceLocator, marker: &str) -> Self {
        Self::new(locator, marker, Box::new(io::sink()))
    }

    /// Reports a finding against `file_hint`. With a `line_pattern` the line
    /// of its first match is reported, and a suppression marker on that line
    /// drops the finding; without one the line is 0.
    ///
    /// Returns whether a diagnostic was emitted.
    pub fn emit(&self, file_hint: &str, line_pattern: Option<&Regex>, severity: Severity, message: &str) -> bool {
        let file = self.locator.resolve(file_hint);

        let line = match line_pattern {
            Some(pattern) => match SourceLocator::find_line(&file, pattern, &self.marker) {
                LineLookup::Line(line) => line,
                LineLookup::Suppressed => {
                    log::debug!("Suppressed in {}: {}", file.display(), message);
                    return false;
                }
            },
            None => 0,
        };

        let diagnostic = Diagnostic {
            file,
            line,
            severity,
            message: message.to_string(),
        };

        {
            let mut sink = self.sink.lock();
            if let Err(e) = writeln!(sink, "{}", diagnostic) {
                log::warn!("Failed to write diagnostic: {}", e);
            }
        }
        self.emitted.lock().push(diagnostic);
        true
    }

    pub fn error(&self, file_hint: &str, message: &str) -> bool {
        self.emit(file_hint, None, Severity::Error, message)
    }

    pub fn warning(&self, file_hint: &str, message: &str) -> bool {
        self.emit(file_hint, None, Severity::Warning, message)
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.emitted.lock().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.emitted.lock().iter().filter(|d| d.severity == severity).count()
    }

    pub fn len(&self) -> usize {
        self.emitted.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitted.lock().is_empty()
    }

    pub fn flush(&self) {
        if let Err(e) = self.sink.lock().flush() {
            log::warn!("Failed to flush diagnostics: {}", e);
        }
    }
}
