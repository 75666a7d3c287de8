//! Chat application module for medical question answering.
//!
//! This module provides a REPL chat interface built on top of the Gemini
//! client.  It supports:
//!
//! - A single transcript per session, opened by a fixed medical instruction
//! - Labeled chat bubbles for user and assistant turns
//! - Slash commands for session control
//!
//! # Architecture
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: the transcript and the exchange with the remote model
//! - [`presenter`]: turning input events into bubbles
//! - [`commands`]: Slash command parsing

mod commands;
mod config;
mod presenter;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, MEDICAL_SYSTEM_INSTRUCTION};
pub use presenter::{INPUT_PLACEHOLDER, PAGE_ICON, PAGE_TITLE, Presenter};
pub use session::{ChatSession, DECLINED_REPLY, SessionState, SessionStats, failure_reply};
