//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction so the
//! session controller never touches stdout directly. The default
//! implementation styles source labels and errors with ANSI escape codes
//! and can be switched to plain output for piping.

use std::io::{self, Write};

/// ANSI escape code for dim text (used for source labels).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Trait for rendering consultation output.
pub trait Renderer: Send {
    /// Print an assistant answer.
    ///
    /// Answer content is markup-bearing text from the backend and is
    /// printed verbatim.
    fn print_answer(&mut self, answer: &str);

    /// Print the retrieval source label accompanying an answer.
    fn print_source(&mut self, source: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Renderer that writes plain text to stdout.
pub struct PlainTextRenderer {
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a renderer with ANSI styling enabled.
    pub fn new() -> Self {
        Self { use_color: true }
    }

    /// Creates a renderer with ANSI styling controlled by `use_color`.
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_answer(&mut self, answer: &str) {
        println!("{}", answer);
        self.flush();
    }

    fn print_source(&mut self, source: &str) {
        if self.use_color {
            println!("{ANSI_DIM}[source: {source}]{ANSI_RESET}");
        } else {
            println!("[source: {source}]");
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("{ANSI_RED}error: {error}{ANSI_RESET}");
        } else {
            eprintln!("error: {error}");
        }
    }

    fn print_info(&mut self, info: &str) {
        println!("{}", info);
        self.flush();
    }
}
