//! Terminal styling for CLI output
//!
//! Colors go through `owo-colors`, which honours `NO_COLOR`, `CLICOLOR`,
//! `CLICOLOR_FORCE` and TTY detection per stream.

use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};

pub use owo_colors::Stream;

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// Marker for the checked-out branch
pub const CURRENT: &str = "@";

/// A value rendered with a style when the target stream supports color
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

const fn styled<T>(value: T, style: Style, stream: Stream) -> Styled<T> {
    Styled {
        value,
        style,
        stream,
    }
}

/// Semantic styles for anything printable
pub trait Stylize: Display {
    /// Cyan: branch names, PR numbers, links
    fn accent(&self) -> Styled<&Self> {
        styled(self, ACCENT, Stream::Stdout)
    }

    /// Green: completed work
    fn success(&self) -> Styled<&Self> {
        styled(self, SUCCESS, Stream::Stdout)
    }

    /// Yellow, for stderr: skipped or failed follow-up steps
    fn warn(&self) -> Styled<&Self> {
        styled(self, WARN, Stream::Stderr)
    }

    /// Dim: hints and metadata
    fn muted(&self) -> Styled<&Self> {
        styled(self, MUTED, Stream::Stdout)
    }

    /// Bold: headers and phase names
    fn emphasis(&self) -> Styled<&Self> {
        styled(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green check mark
pub const fn check() -> Styled<&'static str> {
    styled("✓", SUCCESS, Stream::Stdout)
}

/// Cyan arrow
pub const fn arrow() -> Styled<&'static str> {
    styled("→", ACCENT, Stream::Stdout)
}

/// Dim bullet for tree nodes
pub const fn bullet() -> Styled<&'static str> {
    styled("○", MUTED, Stream::Stdout)
}

/// Dim vertical bar for tree edges
pub const fn pipe() -> Styled<&'static str> {
    styled("│", MUTED, Stream::Stdout)
}

/// The URL as an OSC 8 hyperlink where the terminal supports it
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    let target = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };
    if supports_hyperlinks::on(target) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}
