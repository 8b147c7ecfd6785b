use crossterm::style::Color;

/// Environment variable that disables colored output when set to anything non-empty
pub const NO_COLOR_VAR: &str = "NO_COLOR";

/// Colors used when drawing the selector.
///
/// Passed explicitly into [`super::fuzzy_select`] rather than read from globals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectorTheme {
    /// The `> ` prompt in front of the query
    pub prompt: Color,
    /// The highlighted row
    pub selected: Color,
    /// Every other row, and the "No matches" placeholder
    pub normal: Color,
    /// The key binding hint at the bottom
    pub hint: Color,
    /// Whether the highlighted row is bold
    pub bold_selected: bool,
}

impl Default for SelectorTheme {
    fn default() -> Self {
        Self {
            prompt: Color::AnsiValue(212),
            selected: Color::AnsiValue(212),
            normal: Color::AnsiValue(252),
            hint: Color::AnsiValue(252),
            bold_selected: true,
        }
    }
}

impl SelectorTheme {
    /// Uses the terminal's own colors everywhere.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            prompt: Color::Reset,
            selected: Color::Reset,
            normal: Color::Reset,
            hint: Color::Reset,
            bold_selected: true,
        }
    }

    /// The default theme, or [`SelectorTheme::plain`] when `NO_COLOR` is set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::for_no_color(std::env::var_os(NO_COLOR_VAR).filter(|v| !v.is_empty()).is_some())
    }

    fn for_no_color(no_color: bool) -> Self {
        if no_color {
            Self::plain()
        } else {
            Self::default()
        }
    }
}
