//! ANSI styling for text output.
//!
//! Styles are named after what they mark in a report rather than the color
//! they happen to use.

const RESET: &str = "\x1b[0m";
const BOLD_WHITE: &str = "\x1b[1;97m";
const DIM: &str = "\x1b[90m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Escape sequences for each report role. Every field is empty when color
/// is off, so renderers can interpolate them unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    /// Location names along a route.
    pub place: &'static str,
    /// Secondary detail such as distances.
    pub muted: &'static str,
    /// Open or paved roads.
    pub good: &'static str,
    /// Unpaved roads and hazard tags.
    pub caution: &'static str,
    /// Closed roads and warnings.
    pub bad: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: RESET,
            place: BOLD_WHITE,
            muted: DIM,
            good: GREEN,
            caution: YELLOW,
            bad: RED,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            place: "",
            muted: "",
            good: "",
            caution: "",
            bad: "",
        }
    }

    /// Pick a palette from the process environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::for_env(
            std::env::var_os("NO_COLOR").is_some(),
            std::env::var("TERM").ok().as_deref(),
        )
    }

    /// Plain when `NO_COLOR` is set or the terminal is `dumb`.
    #[must_use]
    pub fn for_env(no_color: bool, term: Option<&str>) -> Self {
        let dumb = term.is_some_and(|term| term.eq_ignore_ascii_case("dumb"));
        if no_color || dumb {
            Self::plain()
        } else {
            Self::colored()
        }
    }
}
