//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips ANSI codes when stdout is not
//! a terminal, so these helpers can color unconditionally.

use owo_colors::colors::{Cyan, Green, Red, Yellow};
use owo_colors::styles::{BoldDisplay, DimDisplay};
use owo_colors::{FgColorDisplay, OwoColorize};

/// Success glyph
pub const CHECK: &str = "✓";
/// Failure glyph
pub const CROSS: &str = "✗";
/// Attention glyph
pub const WARNING: &str = "⚠";
/// Pair arrow
pub const ARROW: &str = "→";

/// Semantic styles for CLI output
pub trait Stylize: OwoColorize {
    /// Headings and names
    fn emphasis(&self) -> BoldDisplay<'_, Self> {
        self.bold()
    }

    /// Secondary text
    fn muted(&self) -> DimDisplay<'_, Self> {
        self.dimmed()
    }

    /// Values worth noticing (branch names, counts)
    fn accent(&self) -> FgColorDisplay<'_, Cyan, Self> {
        self.fg::<Cyan>()
    }

    /// Completed work
    fn success(&self) -> FgColorDisplay<'_, Green, Self> {
        self.fg::<Green>()
    }

    /// Needs attention
    fn warn(&self) -> FgColorDisplay<'_, Yellow, Self> {
        self.fg::<Yellow>()
    }

    /// Failures
    fn error(&self) -> FgColorDisplay<'_, Red, Self> {
        self.fg::<Red>()
    }
}

impl<T: OwoColorize> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success().to_string()
}

/// Red cross
pub fn cross() -> String {
    CROSS.error().to_string()
}

/// Yellow warning sign
pub fn warning() -> String {
    WARNING.warn().to_string()
}

/// Muted arrow
pub fn arrow() -> String {
    ARROW.muted().to_string()
}

/// `#123`, hyperlinked to the PR when the terminal supports it
pub fn pr_link(number: u64, url: &str) -> String {
    let text = format!("#{number}");
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(&text, url).to_string()
    } else {
        format!("{text} ({url})")
    }
}
