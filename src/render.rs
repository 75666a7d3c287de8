//! Output rendering for the chat transcript.
//!
//! This module provides the renderer trait the presenter draws through and a
//! plain-text implementation that prints labeled chat bubbles to stdout.

use std::io::{self, Stdout, Write};

/// ANSI escape code for bold text (used for the title).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for informational lines).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the user label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for the assistant label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for any other label).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - In-memory capture for tests
pub trait Renderer: Send {
    /// Print the page title.
    fn print_title(&mut self, title: &str, icon: &str);

    /// Print one chat bubble labeled with the speaker.
    fn print_bubble(&mut self, label: &str, text: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    fn emit(&mut self, text: &str) {
        let _ = self.stdout.write_all(text.as_bytes());
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_title(&mut self, title: &str, icon: &str) {
        let line = if self.use_color {
            format!("{ANSI_BOLD}{icon} {title}{ANSI_RESET}\n\n")
        } else {
            format!("{icon} {title}\n\n")
        };
        self.emit(&line);
    }

    fn print_bubble(&mut self, label: &str, text: &str) {
        let bubble = format_bubble(label, text, self.use_color);
        self.emit(&bubble);
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("{ANSI_RED}Error: {error}{ANSI_RESET}");
        } else {
            eprintln!("Error: {error}");
        }
    }

    fn print_info(&mut self, info: &str) {
        let line = if self.use_color {
            format!("{ANSI_DIM}{info}{ANSI_RESET}\n")
        } else {
            format!("{info}\n")
        };
        self.emit(&line);
    }
}

/// Formats a bubble: the label on its own line, then the text indented.
pub fn format_bubble(label: &str, text: &str, use_color: bool) -> String {
    let mut out = if use_color {
        let color = match label {
            "user" => ANSI_CYAN,
            "assistant" => ANSI_GREEN,
            _ => ANSI_YELLOW,
        };
        format!("{color}{label}{ANSI_RESET}\n")
    } else {
        format!("{label}\n")
    };
    for line in text.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push('\n');
    out
}
