//! Interactive chat for asking medical questions.
//!
//! This binary provides a REPL interface that forwards each question to a
//! Gemini model primed with a medical-assistant instruction.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage; reads the key from GOOGLE_API_KEY
//! medassist-chat
//!
//! # Specify a model
//! medassist-chat --model gemini-1.5-pro
//!
//! # Disable colors (useful for piping output)
//! medassist-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/history` - Show the conversation so far
//! - `/model <name>` - Change the model
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use medassist::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, INPUT_PLACEHOLDER, PlainTextRenderer,
    Presenter, Renderer, help_text, parse_command,
};
use medassist::{Gemini, JsonLinesLogger, KnownModel, Model};

/// Main entry point for the medassist-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("medassist-chat [OPTIONS]");
    let config = ChatConfig::try_from(args)?;
    let use_color = config.use_color;

    let mut client = Gemini::with_options(config.api_key.clone(), config.base_url.clone(), None)?;
    if config.log_requests {
        client = client.with_logger(Arc::new(JsonLinesLogger::stderr()));
    }
    let has_api_key = client.has_api_key();

    let mut session = ChatSession::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    Presenter::new(&mut renderer).render_title();
    if !has_api_key {
        renderer.print_error("GOOGLE_API_KEY is not set; every question will fail until it is.");
    }
    session.initialize().await;
    renderer.print_info(&format!(
        "{INPUT_PLACEHOLDER} (model: {}; /help for commands, /quit to exit)\n",
        session.model()
    ));

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::History => {
                            Presenter::new(&mut renderer).render_history(&session);
                        }
                        ChatCommand::Model(model_name) => {
                            session.set_model(Model::from(model_name.as_str()));
                            renderer.print_info(&format!("Model changed to: {}", model_name));
                        }
                        ChatCommand::Models => {
                            for model in KnownModel::ALL {
                                println!("    {model}");
                            }
                        }
                        ChatCommand::MaxTokens(value) => {
                            session.set_max_tokens(Some(value));
                            renderer.print_info(&format!("max_tokens set to {value}"));
                        }
                        ChatCommand::ClearMaxTokens => {
                            session.set_max_tokens(None);
                            renderer.print_info("max_tokens reset to model default");
                        }
                        ChatCommand::Temperature(value) => {
                            session.set_temperature(Some(value));
                            renderer.print_info(&format!("temperature set to {:.2}", value));
                        }
                        ChatCommand::ClearTemperature => {
                            session.set_temperature(None);
                            renderer.print_info("temperature reset to model default");
                        }
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Redraws the user's line as a bubble beneath the prompt.
                Presenter::new(&mut renderer)
                    .on_user_input(&mut session, line)
                    .await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats(session: &ChatSession<Gemini>) {
    let stats = session.stats();
    let config = session.config();
    println!("    Session Statistics:");
    println!("      Model: {}", stats.model);
    println!("      Turns: {}", stats.turn_count);
    println!("      Questions: {}", stats.submissions);
    println!("      Withheld answers: {}", stats.declined);
    println!("      Failed requests: {}", stats.failed);
    println!("      Requests sent: {}", stats.requests);
    println!(
        "      Temperature: {}",
        config
            .temperature
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "default".to_string())
    );
    println!(
        "      Max tokens: {}",
        config
            .max_tokens
            .map(|v| v.to_string())
            .unwrap_or_else(|| "default".to_string())
    );
}
