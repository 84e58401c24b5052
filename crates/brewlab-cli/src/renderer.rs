//! Terminal rendering for markdown output
//!
//! Uses termimad for rich output, with a plain-text mode for pipes, tests and
//! `--no-color`.

use anyhow::Result;
use termimad::{MadSkin, crossterm::style::Color};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::DarkYellow);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render a markdown document.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            // Tables need the whole block at once to size their columns
            self.skin.print_text(markdown);
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// Render one line, e.g. a timer update.
    pub fn line(&self, markdown: &str) {
        if self.rich_enabled {
            self.skin.print_inline(markdown);
            println!();
        } else {
            println!("{markdown}");
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
