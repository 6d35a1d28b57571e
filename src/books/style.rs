//! Annotation style code definitions.
//!
//! Maps the `ZANNOTATIONSTYLE` integer to a [`HighlightStyle`] enum. The
//! application stores the marker color as a small code; 0 doubles as the
//! underline marker (paired with `ZANNOTATIONISUNDERLINE`). Codes observed
//! in the wild are 0 through 5; anything else is carried as `Other` so a
//! future application version cannot break row mapping.

use serde::Serialize;
use std::fmt;

/// Highlight marker styles used by the annotation store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HighlightStyle {
    /// Underline marker (style 0)
    Underline,
    /// Green highlight (style 1)
    Green,
    /// Blue highlight (style 2)
    Blue,
    /// Yellow highlight (style 3)
    Yellow,
    /// Pink highlight (style 4)
    Pink,
    /// Purple highlight (style 5)
    Purple,
    /// Unrecognized style code
    Other(i64),
}

impl HighlightStyle {
    /// Map a raw `ZANNOTATIONSTYLE` value to a style.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => HighlightStyle::Underline,
            1 => HighlightStyle::Green,
            2 => HighlightStyle::Blue,
            3 => HighlightStyle::Yellow,
            4 => HighlightStyle::Pink,
            5 => HighlightStyle::Purple,
            other => HighlightStyle::Other(other),
        }
    }

    /// Short lowercase name for display and JSON output.
    pub fn name(&self) -> String {
        match self {
            HighlightStyle::Underline => "underline".to_string(),
            HighlightStyle::Green => "green".to_string(),
            HighlightStyle::Blue => "blue".to_string(),
            HighlightStyle::Yellow => "yellow".to_string(),
            HighlightStyle::Pink => "pink".to_string(),
            HighlightStyle::Purple => "purple".to_string(),
            HighlightStyle::Other(code) => format!("style-{code}"),
        }
    }
}

impl fmt::Display for HighlightStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_round_trip() {
        assert_eq!(HighlightStyle::from_code(0), HighlightStyle::Underline);
        assert_eq!(HighlightStyle::from_code(3), HighlightStyle::Yellow);
        assert_eq!(HighlightStyle::from_code(5), HighlightStyle::Purple);
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let style = HighlightStyle::from_code(42);
        assert_eq!(style, HighlightStyle::Other(42));
        assert_eq!(style.name(), "style-42");
    }
}
