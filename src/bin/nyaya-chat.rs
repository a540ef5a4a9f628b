//! Interactive terminal client for the Nyaya legal consultation service.
//!
//! This binary provides a REPL that walks through the two phases of a
//! consultation: selecting the mandatory filters, then chatting with the
//! backend.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage against the default local backend
//! nyaya-chat
//!
//! # Point at a deployed backend
//! nyaya-chat --url https://backend.example.com/query
//!
//! # Preselect filters and attach a document up front
//! nyaya-chat --language Hindi --area IPC --user-type advocate --attach notice.pdf
//!
//! # Disable colors (useful for piping output)
//! nyaya-chat --no-color
//! ```
//!
//! # Commands
//!
//! While the REPL is running, you can use slash commands:
//! - `/language <code>`, `/area <code>`, `/usertype <code>` - pick filters
//! - `/start` - enter the consultation
//! - `/attach <path>` / `/detach` - manage the document attachment
//! - `/reset` - tear the session down to configuration
//! - `/help` - show all commands
//! - `/quit` - exit the application

use std::path::Path;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use nyaya::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, SessionPhase,
    SessionState, help_text, parse_command,
};
use nyaya::{Language, LegalArea, Nyaya, UserType};

/// Main entry point for the nyaya-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("nyaya-chat [OPTIONS]");
    let config = ChatConfig::try_from(args)?;
    let use_color = config.use_color;
    let attach_path = config.attach_path.clone();

    let client = Nyaya::new(config.query_url.clone())?;
    let mut session = ChatSession::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Nyaya Legal Consultation");
    println!("Pick your filters (/language, /area, /usertype), then /start.");
    println!("Type /help for commands, /quit to exit\n");

    if let Some(path) = attach_path {
        attach_document(&mut session, &mut renderer, &path);
    }

    loop {
        let prompt = match session.state().phase() {
            SessionPhase::Configuring => "configure> ",
            SessionPhase::Chatting => "You: ",
        };

        let readline = rl.readline(prompt);

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
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
                        ChatCommand::Start => match session.state_mut().start() {
                            Ok(()) => {
                                renderer.print_info(&format!(
                                    "Legal Consultation: {}",
                                    session_header(session.state())
                                ));
                                renderer.print_info("Begin your legal consultation.");
                                renderer.print_info(
                                    "Ask about case law, regulations, or document analysis.",
                                );
                            }
                            Err(err) => renderer.print_error(&err.user_message()),
                        },
                        ChatCommand::Reset => {
                            session.reset();
                            renderer.print_info("Session reset.");
                        }
                        ChatCommand::Language(code) => match code.parse::<Language>() {
                            Ok(language) => {
                                session.state_mut().set_language(language);
                                renderer.print_info(&format!(
                                    "Language set to {} ({})",
                                    language,
                                    language.label()
                                ));
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Area(code) => match code.parse::<LegalArea>() {
                            Ok(area) => {
                                session.state_mut().set_legal_area(area);
                                renderer.print_info(&format!("Legal area set to {}", area.label()));
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::UserType(code) => match code.parse::<UserType>() {
                            Ok(user_type) => {
                                session.state_mut().set_user_type(user_type);
                                renderer
                                    .print_info(&format!("User type set to {}", user_type.label()));
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Attach(path) => {
                            attach_document(&mut session, &mut renderer, Path::new(&path));
                        }
                        ChatCommand::Detach => {
                            session.state_mut().detach();
                            renderer.print_info("Attachment removed.");
                        }
                        ChatCommand::Dismiss => {
                            session.state_mut().dismiss_error();
                        }
                        ChatCommand::ShowConfig => {
                            print_config(session.state());
                        }
                        ChatCommand::Filters => {
                            print_filters();
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - submit as a consultation turn
                match session.state().phase() {
                    SessionPhase::Configuring => {
                        renderer.print_error(
                            "No consultation in progress. Pick your filters, then /start.",
                        );
                    }
                    SessionPhase::Chatting => {
                        session.state_mut().set_draft(line);
                        renderer.print_info("Analyzing...");
                        match session.send().await {
                            Ok(Some(reply)) => {
                                println!("Nyaya:");
                                if let Some(source) = reply.source_label.as_deref() {
                                    renderer.print_source(source);
                                }
                                renderer.print_answer(&reply.content);
                            }
                            Ok(None) => {}
                            Err(err) => renderer.print_error(&err.user_message()),
                        }
                    }
                }
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

/// Reads a document from disk and offers it to the session's validator.
fn attach_document(session: &mut ChatSession, renderer: &mut PlainTextRenderer, path: &Path) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    match std::fs::read(path) {
        Ok(bytes) => match session.state_mut().attach(name.clone(), bytes) {
            Ok(()) => renderer.print_info(&format!("Attached: {}", name)),
            Err(_) => {
                let message = session
                    .state()
                    .attachment_error()
                    .unwrap_or("attachment rejected");
                renderer.print_error(message);
            }
        },
        Err(err) => {
            renderer.print_error(&format!("Failed to read {}: {}", path.display(), err));
        }
    }
}

fn session_header(state: &SessionState) -> String {
    let config = state.config();
    let language = config
        .language
        .map(|l| l.to_string())
        .unwrap_or_else(|| "(none)".to_string());
    let area = config
        .legal_area
        .map(|a| a.to_string())
        .unwrap_or_else(|| "(none)".to_string());
    let user_type = config
        .user_type
        .map(|u| u.label().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    format!("{} • {} • {}", language, area, user_type)
}

fn print_config(state: &SessionState) {
    println!("    Current Configuration:");
    println!("      Filters: {}", session_header(state));
    match state.attachment() {
        Some(attachment) => println!(
            "      Attachment: {} ({} bytes)",
            attachment.name,
            attachment.byte_size()
        ),
        None => println!("      Attachment: (none)"),
    }
    if let Some(error) = state.attachment_error() {
        println!("      Attachment error: {}", error);
    }
    let phase = match state.phase() {
        SessionPhase::Configuring => "configuring",
        SessionPhase::Chatting => "chatting",
    };
    println!("      Phase: {}", phase);
    println!("      Messages: {}", state.store().len());
    match state.last_error() {
        Some(error) => println!("      Error banner: {}", error),
        None => println!("      Error banner: (none)"),
    }
}

fn print_filters() {
    println!("    Languages:");
    for language in Language::ALL {
        println!("      {:<12} {}", language.to_string(), language.label());
    }
    println!("    Legal areas:");
    for area in LegalArea::ALL {
        println!("      {:<12} {}", area.to_string(), area.label());
    }
    println!("    User types:");
    for user_type in UserType::ALL {
        println!("      {:<12} {}", user_type.to_string(), user_type.label());
    }
}
