//! One-shot submission
//!
//! Sends a single message (optionally with an image) and prints the result.
//!
//! Run with: cargo run --example one_shot -- "describe this" path/to/image.png
//!       or: cargo run --example one_shot -- "generate image a lighthouse at dusk"

use anyhow::{Context, Result};
use std::sync::Arc;

use chatmux::helpers::{load_image, save_generated_image};
use chatmux::{BedrockProvider, ChatModel, ChatSession, ImageModel, Input, Outcome};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("one_shot=info,chatmux=info")
        .init();

    let mut args = std::env::args().skip(1);
    let text = args.next();
    let image = args
        .next()
        .map(|path| load_image(&path).with_context(|| format!("Failed to read {}", path)))
        .transpose()?;

    let provider = Arc::new(BedrockProvider::from_env()?);
    println!("[Setup] Chat model: {}", ChatModel::model(provider.as_ref()));
    println!("[Setup] Image model: {}", ImageModel::model(provider.as_ref()));

    let output_dir = provider.config().output_dir.clone();
    let mut session = ChatSession::new(provider.clone(), provider);

    match session.submit(&Input::new(text, image)).await? {
        Outcome::Reply(reply) => println!("Assistant: {}", reply),
        Outcome::Image(image) => {
            let path = save_generated_image(&output_dir, &image.bytes)?;
            println!("Saved image for \"{}\" to {}", image.prompt, path.display());
        }
        Outcome::Noop => println!("Nothing to send. Pass a message and/or an image path."),
    }

    Ok(())
}
