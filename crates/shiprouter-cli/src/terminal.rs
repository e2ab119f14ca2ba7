//! Terminal styling and color detection.
//!
//! Route listings highlight the departure and arrival waypoints with ANSI
//! badges when the terminal allows it.

/// ANSI escape codes used by the text renderer.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold reverse green for the departure badge.
    pub const TAG_START: &str = "\x1b[1;7;32m";
    /// Bold reverse cyan for intermediate waypoints.
    pub const TAG_WAYPOINT: &str = "\x1b[1;7;36m";
    /// Bold reverse magenta for the arrival badge.
    pub const TAG_GOAL: &str = "\x1b[1;7;35m";
    /// Bright bold white for coordinates.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary text.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for voyage figures.
    pub const CYAN: &str = "\x1b[36m";
}

/// Resolved color codes, or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_start: &'static str,
    pub tag_waypoint: &'static str,
    pub tag_goal: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_start: colors::TAG_START,
            tag_waypoint: colors::TAG_WAYPOINT,
            tag_goal: colors::TAG_GOAL,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_start: "",
            tag_waypoint: "",
            tag_goal: "",
            white_bold: "",
            gray: "",
            cyan: "",
        }
    }

    /// Pick a palette based on [`supports_color`].
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

/// Check whether the terminal should receive ANSI color codes.
///
/// Honours `NO_COLOR` (<https://no-color.org/>) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a number with thousand separators (commas).
///
/// ```
/// # use shiprouter_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1000), "1,000");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_for_small_and_large_numbers() {
        assert_eq!(format_with_separators(0), "0");
        assert_eq!(format_with_separators(12), "12");
        assert_eq!(format_with_separators(64_800), "64,800");
        assert_eq!(format_with_separators(1_036_800), "1,036,800");
    }

    #[test]
    fn plain_palette_has_no_escape_codes() {
        let palette = ColorPalette::plain();
        assert!(palette.reset.is_empty());
        assert!(palette.tag_start.is_empty());
        assert!(palette.tag_goal.is_empty());
    }
}
