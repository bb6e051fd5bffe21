//! Interactive terminal front-end
//!
//! Run with: cargo run
//! Requires BEDROCK_API_KEY (or AWS_BEARER_TOKEN_BEDROCK) to be set.

use anyhow::{Context, Result};
use std::sync::Arc;

use chatmux::cli::Console;
use chatmux::helpers::{load_image, save_generated_image};
use chatmux::logging::init_logging;
use chatmux::{BedrockProvider, ChatResult, ChatSession, Input, Outcome};

const IMAGE_COMMAND: &str = "/image";

/// A line typed at the prompt
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Exit,
    History,
    Reset,
    StageImage(&'a str),
    /// `/image` with no path
    MissingImagePath,
    Submit(&'a str),
}

/// The text after `/image` (any case), if the line is that command
fn image_command_arg(line: &str) -> Option<&str> {
    let head = line.get(..IMAGE_COMMAND.len())?;
    let rest = &line[IMAGE_COMMAND.len()..];
    if head.eq_ignore_ascii_case(IMAGE_COMMAND)
        && (rest.is_empty() || rest.starts_with(char::is_whitespace))
    {
        Some(rest.trim())
    } else {
        None
    }
}

fn parse_command(line: &str) -> Command<'_> {
    let lowered = line.to_lowercase();
    if lowered == "exit" || lowered == "quit" {
        Command::Exit
    } else if lowered == "/history" {
        Command::History
    } else if lowered == "/reset" {
        Command::Reset
    } else if let Some(path) = image_command_arg(line) {
        if path.is_empty() {
            Command::MissingImagePath
        } else {
            Command::StageImage(path)
        }
    } else {
        Command::Submit(line)
    }
}

/// Submit `text` with the staged upload
///
/// The upload is consumed on success and put back in `staged` on failure.
async fn submit_staged(
    session: &mut ChatSession,
    text: &str,
    staged: &mut Option<Vec<u8>>,
) -> ChatResult<Outcome> {
    let input = Input::new(Some(text.to_string()), staged.take());
    let result = session.submit(&input).await;
    match result {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            *staged = input.into_image();
            if staged.is_some() {
                tracing::info!("Keeping staged image after failed submission");
            }
            Err(e)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging().context("Failed to initialize logging")?;

    let provider = Arc::new(BedrockProvider::from_env().context("Failed to configure Bedrock")?);
    let output_dir = provider.config().output_dir.clone();
    let mut session = ChatSession::new(provider.clone(), provider);

    let console = Console::new();
    console.print_banner();

    let mut staged_image: Option<Vec<u8>> = None;

    loop {
        let line = match console.read_input(staged_image.is_some()) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read user input: {}", e);
                console.print_error(&format!("Failed to read input: {}", e));
                continue;
            }
        };

        let text = match parse_command(&line) {
            Command::Exit => {
                tracing::info!("User requested exit");
                console.print_system("Goodbye!");
                break;
            }
            Command::History => {
                console.print_history(session.history().messages());
                continue;
            }
            Command::Reset => {
                session.reset();
                staged_image = None;
                console.print_system("Conversation cleared.");
                continue;
            }
            Command::StageImage(path) => {
                match load_image(path) {
                    Ok(bytes) => {
                        console.print_system(&format!(
                            "Image staged ({} bytes). It will be sent with your next message.",
                            bytes.len()
                        ));
                        staged_image = Some(bytes);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load image {}: {}", path, e);
                        console.print_error(&format!("Cannot read image {}: {}", path, e));
                    }
                }
                continue;
            }
            Command::MissingImagePath => {
                console.print_error("Usage: /image <path>");
                continue;
            }
            Command::Submit(text) => text,
        };

        if text.is_empty() && staged_image.is_none() {
            continue;
        }

        console.println();
        let result = submit_staged(&mut session, text, &mut staged_image).await;
        match result {
            Ok(Outcome::Reply(reply)) => console.print_assistant(&reply),
            Ok(Outcome::Image(image)) => match save_generated_image(&output_dir, &image.bytes) {
                Ok(path) => console.print_image_saved(&image.prompt, &path),
                Err(e) => {
                    tracing::error!("Failed to save generated image: {}", e);
                    console.print_error(&format!("Failed to save image: {}", e));
                }
            },
            Ok(Outcome::Noop) => {}
            Err(e) => {
                tracing::error!("Submission failed: {:?}", e);
                console.print_error(&format!("Request failed: {}", e));
                if staged_image.is_some() {
                    console.print_system("The staged image is kept for your next message.");
                }
            }
        }
        console.println();
        console.print_separator();
    }

    tracing::info!("Session ended with {} messages", session.history().len());
    Ok(())
}
