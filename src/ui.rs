//! Terminal notification and display helpers

use console::Term;
use owo_colors::OwoColorize;

/// Fixed user-facing messages, one per failing operation
pub mod messages {
    pub const GET_CATS_FAILED: &str = "Could not retrieve cats.";
    pub const GET_VOTES_FAILED: &str = "Could not retrieve votes.";
    pub const UPLOAD_FAILED: &str = "Failed to post the picture.";
    pub const DELETE_FAILED: &str = "Failed to delete the picture.";
    pub const FAVOURITE_FAILED: &str = "Failed to favourite the picture.";
    pub const UNFAVOURITE_FAILED: &str = "Failed to un-favourite the picture.";
    pub const VOTE_FAILED: &str = "Failed to vote on the picture.";
    pub const WRONG_FILE_TYPE: &str = "Wrong file type selected";
    pub const VOTES_TRUNCATED: &str =
        "100 or more votes have been cast; the API cannot return more than that. \
         Vote counts might be inaccurate.";
}

/// Terminal UI helper
pub struct Ui {
    term: Term,
}

impl Ui {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn supports_color(&self) -> bool {
        self.term.features().colors_supported()
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.supports_color() {
            println!("{}", message.green().bold());
        } else {
            println!("{}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.supports_color() {
            eprintln!("{}", message.red().bold());
        } else {
            eprintln!("{}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.supports_color() {
            println!("{}", message.yellow().bold());
        } else {
            println!("{}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.supports_color() {
            println!("{}", message.blue().bold());
        } else {
            println!("{}", message);
        }
    }

    /// Format a connection status label
    pub fn format_server_status(&self, connected: bool) -> String {
        let text = if connected {
            "Connected"
        } else {
            "Connection failed"
        };
        if self.supports_color() {
            if connected {
                text.green().to_string()
            } else {
                text.red().to_string()
            }
        } else {
            text.to_string()
        }
    }

    /// Card-style display for key/value information
    pub fn card(&self, title: &str, content: Vec<(&str, String)>) {
        let width = self
            .term
            .size()
            .1
            .saturating_sub(4)
            .clamp(50, 80) as usize;
        let supports_color = self.supports_color();

        println!("╭{}╮", "─".repeat(width - 2));
        let title_spaces = width.saturating_sub(title.len() + 4);
        if supports_color {
            println!("│ {} {}│", title.cyan().bold(), " ".repeat(title_spaces));
        } else {
            println!("│ {} {}│", title, " ".repeat(title_spaces));
        }
        println!("├{}┤", "─".repeat(width - 2));

        for (label, value) in content {
            let content_width = label.len() + value.len() + 4;
            let spaces = if content_width < width - 1 {
                width - content_width - 1
            } else {
                1
            };

            if supports_color {
                println!("│ {}: {}{}│", label.dimmed(), value, " ".repeat(spaces));
            } else {
                println!("│ {}: {}{}│", label, value, " ".repeat(spaces));
            }
        }

        println!("╰{}╯", "─".repeat(width - 2));
    }

    /// Print a separator line
    pub fn separator(&self) {
        let width = (self.term.size().1 as usize).min(80);
        let line = "─".repeat(width);
        if self.supports_color() {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress bar shown while an upload is in flight
pub fn create_upload_bar(message: &str) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}
