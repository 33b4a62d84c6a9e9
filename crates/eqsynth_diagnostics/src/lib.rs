//! Warnings about skipped declarations, and their terminal rendering.
//!
//! The generator core never fails a pass because of a single declaration.
//! When asked to, it reports declarations it had to skip as structured
//! [`Diagnostic`] values collected in a thread-safe [`DiagnosticSink`], and
//! [`TerminalRenderer`] formats them for the command line.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod sink;

pub use code::DiagnosticCode;
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use sink::DiagnosticSink;
