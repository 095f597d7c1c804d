//! Terminal styling and capability detection.
//!
//! This module provides ANSI escape code definitions, color and Unicode
//! detection, and the box-drawing character sets used by the table
//! renderers.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bold reverse green for the route start badge.
    pub const TAG_START: &str = "\x1b[1;7;32m";
    /// Bold reverse magenta for the route goal badge.
    pub const TAG_GOAL: &str = "\x1b[1;7;35m";

    /// Bright bold white for location names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for table borders and secondary text.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for elevations.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for elevation gain.
    pub const GREEN: &str = "\x1b[32m";
    /// Red for unreachable markers.
    pub const RED: &str = "\x1b[31m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_start: &'static str,
    pub tag_goal: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_start: colors::TAG_START,
            tag_goal: colors::TAG_GOAL,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            green: colors::GREEN,
            red: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_start: "",
            tag_goal: "",
            white_bold: "",
            gray: "",
            cyan: "",
            green: "",
            red: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Characters used to draw table borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_mid: char,
    pub top_right: char,
    pub mid_left: char,
    pub cross: char,
    pub mid_right: char,
    pub bottom_left: char,
    pub bottom_mid: char,
    pub bottom_right: char,
}

impl BoxChars {
    /// Light Unicode box-drawing characters.
    #[must_use]
    pub const fn unicode() -> Self {
        Self {
            horizontal: '─',
            vertical: '│',
            top_left: '┌',
            top_mid: '┬',
            top_right: '┐',
            mid_left: '├',
            cross: '┼',
            mid_right: '┤',
            bottom_left: '└',
            bottom_mid: '┴',
            bottom_right: '┘',
        }
    }

    /// Plain ASCII fallback.
    #[must_use]
    pub const fn ascii() -> Self {
        Self {
            horizontal: '-',
            vertical: '|',
            top_left: '+',
            top_mid: '+',
            top_right: '+',
            mid_left: '+',
            cross: '+',
            mid_right: '+',
            bottom_left: '+',
            bottom_mid: '+',
            bottom_right: '+',
        }
    }

    #[must_use]
    pub fn detect() -> Self {
        if supports_unicode() {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
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

/// Check if the terminal supports Unicode characters, based on the `LANG`
/// and `LC_ALL` locale hints.
#[must_use]
pub fn supports_unicode() -> bool {
    if let Ok(lang) = std::env::var("LANG") {
        if lang.to_uppercase().contains("UTF") {
            return true;
        }
    }
    if let Ok(lc_all) = std::env::var("LC_ALL") {
        if lc_all.to_uppercase().contains("UTF") {
            return true;
        }
    }
    #[cfg(windows)]
    {
        if let Ok(term) = std::env::var("TERM") {
            return !term.eq_ignore_ascii_case("dumb");
        }
        return true;
    }
    #[cfg(not(windows))]
    {
        false
    }
}

/// Format a number with thousand separators (commas).
///
/// # Examples
///
/// ```
/// # use altiroute_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1000), "1,000");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
