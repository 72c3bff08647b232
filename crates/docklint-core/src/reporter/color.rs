//! ANSI SGR colors used by the text reporter.

use std::borrow::Cow;

/// Terminal text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Bright green foreground.
    BrightGreen,
    /// Bright red foreground.
    BrightRed,
    /// Reset all attributes.
    Reset,
}

impl Color {
    /// Returns the SGR escape sequence.
    #[must_use]
    pub fn ansi(self) -> &'static str {
        match self {
            Self::BrightGreen => "\x1b[92m",
            Self::BrightRed => "\x1b[91m",
            Self::Reset => "\x1b[0m",
        }
    }

    /// Wraps `text` in this color and a reset when `enabled`.
    #[must_use]
    pub fn paint(self, text: &str, enabled: bool) -> Cow<'_, str> {
        if enabled {
            Cow::Owned(format!("{}{text}{}", self.ansi(), Self::Reset.ansi()))
        } else {
            Cow::Borrowed(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_with_reset() {
        assert_eq!(
            Color::BrightRed.paint("x", true),
            "\x1b[91mx\x1b[0m"
        );
    }

    #[test]
    fn paint_disabled_is_identity() {
        assert_eq!(Color::BrightGreen.paint("ok", false), "ok");
    }
}
