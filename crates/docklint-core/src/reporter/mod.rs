//! Rendering of analysis results.

mod color;
mod table;
mod text;

pub use color::Color;
pub use text::TextReporter;

use std::io::{self, IsTerminal, Write};

/// An output stream a reporter can write to.
///
/// Only real file descriptors can be terminals; in-memory buffers and
/// other writers keep the default `false`.
pub trait ReportSink: Write {
    /// Returns true if this stream is an interactive terminal.
    fn is_terminal(&self) -> bool {
        false
    }
}

impl ReportSink for io::Stdout {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl ReportSink for io::StdoutLock<'_> {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl ReportSink for io::Stderr {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl ReportSink for std::fs::File {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl ReportSink for Vec<u8> {}

impl ReportSink for io::Cursor<Vec<u8>> {}

impl ReportSink for io::Sink {}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn is_terminal(&self) -> bool {
        (**self).is_terminal()
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn is_terminal(&self) -> bool {
        (**self).is_terminal()
    }
}
