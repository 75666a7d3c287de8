//! Logging trait for Gemini client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log all API interactions passing through the [`Gemini`](crate::Gemini)
//! client, and [`JsonLinesLogger`], which writes them to stderr.

use std::io::{self, Write};
use std::sync::Mutex;

use serde::Serialize;

use crate::{GenerateContentRequest, GenerateContentResponse};

/// A trait for logging Gemini client operations.
///
/// Implement this trait to capture and record all API interactions.
pub trait ClientLogger: Send + Sync {
    /// Log a request just before it is sent.
    fn log_request(&self, model: &str, request: &GenerateContentRequest);

    /// Log a successfully parsed response.
    fn log_response(&self, model: &str, response: &GenerateContentResponse);

    /// Log a request that failed before a response could be parsed.
    fn log_error(&self, model: &str, error: &crate::Error);
}

/// Writes each logged event to stderr as one JSON object per line.
pub struct JsonLinesLogger {
    out: Mutex<Box<dyn Write + Send>>,
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum LogLine<'a> {
    Request {
        model: &'a str,
        body: &'a GenerateContentRequest,
    },
    Response {
        model: &'a str,
        body: &'a GenerateContentResponse,
    },
    Error {
        model: &'a str,
        message: String,
    },
}

impl JsonLinesLogger {
    /// Creates a logger that writes to stderr.
    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr()))
    }

    /// Creates a logger that writes to the given sink.
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write(&self, line: &LogLine<'_>) {
        let Ok(json) = serde_json::to_string(line) else {
            return;
        };
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{json}");
            let _ = out.flush();
        }
    }
}

impl ClientLogger for JsonLinesLogger {
    fn log_request(&self, model: &str, request: &GenerateContentRequest) {
        self.write(&LogLine::Request {
            model,
            body: request,
        });
    }

    fn log_response(&self, model: &str, response: &GenerateContentResponse) {
        self.write(&LogLine::Response {
            model,
            body: response,
        });
    }

    fn log_error(&self, model: &str, error: &crate::Error) {
        self.write(&LogLine::Error {
            model,
            message: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::{GenerationConfig, Turn};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_line_per_event() {
        let buffer = SharedBuffer::default();
        let logger = JsonLinesLogger::new(Box::new(buffer.clone()));
        let request =
            GenerateContentRequest::from_turns(&[Turn::user("hi")], GenerationConfig::default());
        logger.log_request("gemini-1.5-flash", &request);
        logger.log_error("gemini-1.5-flash", &crate::Error::timeout("slow", None));

        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "request");
        assert_eq!(first["model"], "gemini-1.5-flash");
        assert_eq!(first["body"]["contents"][0]["parts"][0]["text"], "hi");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["event"], "error");
        assert_eq!(second["message"], "Timeout error: slow");
    }
}
