use colored::*;
use std::io::{self, Write};
use std::path::Path;

use crate::llm::{ContentBlock, Message, Role};

/// Plain `Role: text` lines for a conversation, one per content block
///
/// Image blocks render as `[image]`.
pub fn history_lines(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .flat_map(|msg| {
            msg.content.iter().map(move |block| match block {
                ContentBlock::Text { text } => format!("{}: {}", msg.role.label(), text),
                ContentBlock::Image { .. } => format!("{}: [image]", msg.role.label()),
            })
        })
        .collect()
}

/// Console handles all terminal I/O with colored formatting
pub struct Console {
    user_color: Color,
    assistant_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            user_color: Color::Cyan,
            assistant_color: Color::Green,
        }
    }

    fn role_color(&self, role: Role) -> Color {
        match role {
            Role::User => self.user_color,
            Role::Assistant => self.assistant_color,
        }
    }

    /// Print a complete assistant reply
    pub fn print_assistant(&self, message: &str) {
        println!(
            "{} {}",
            "Assistant:".color(self.assistant_color).bold(),
            message.color(self.assistant_color)
        );
    }

    /// Print where a generated image was written
    pub fn print_image_saved(&self, prompt: &str, path: &Path) {
        let shown = path.display().to_string();
        println!(
            "{} generated image for \"{}\" saved to {}",
            "Assistant:".color(self.assistant_color).bold(),
            prompt,
            shown.as_str().underline()
        );
    }

    /// Print the role-tagged conversation
    pub fn print_history(&self, messages: &[Message]) {
        println!("{}", "Chat History".bright_blue().bold());
        if messages.is_empty() {
            println!("{}", "(empty)".bright_black());
            return;
        }
        for msg in messages {
            let label = format!("{}:", msg.role.label());
            for block in &msg.content {
                let body = match block {
                    ContentBlock::Text { text } => text.clone(),
                    ContentBlock::Image { .. } => "[image]".italic().to_string(),
                };
                println!(
                    "{} {}",
                    label.as_str().color(self.role_color(msg.role)).bold(),
                    body
                );
            }
        }
    }

    /// Print a newline
    pub fn println(&self) {
        println!();
    }

    /// Print a system message (errors, info, etc.)
    pub fn print_system(&self, message: &str) {
        println!("{} {}", "System:".yellow().bold(), message);
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    /// Read a line of input from the user
    ///
    /// Returns `None` at end of input.
    pub fn read_input(&self, image_staged: bool) -> io::Result<Option<String>> {
        let marker = if image_staged { "[img] >" } else { ">" };
        print!("{} ", marker.color(self.user_color).bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }

    /// Print a welcome banner
    pub fn print_banner(&self) {
        println!("{}", "=".repeat(60).bright_blue());
        println!("{}", "  chatmux - multimodal chat".bright_blue().bold());
        println!("{}", "=".repeat(60).bright_blue());
        println!();
        println!("Type a message and press Enter. Start with 'generate image' to create one.");
        println!("Commands: /image <path>  /history  /reset  exit");
        println!();
    }

    /// Print a separator line
    pub fn print_separator(&self) {
        println!("{}", "-".repeat(60).bright_black());
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_lines() {
        let messages = vec![
            Message::user_input(Some("what is this?"), Some(b"img".as_slice())).unwrap(),
            Message::assistant("a cat"),
        ];
        assert_eq!(
            history_lines(&messages),
            vec!["User: what is this?", "User: [image]", "Assistant: a cat"]
        );
    }
}
