use crate::color::{Color, ColorDepth, Rgb};
use crate::config::types::Theme;

/// Detected terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Dark,
    Light,
}

impl Background {
    /// Detect whether the terminal has a dark or light background.
    ///
    /// Heuristic: check `COLORFGBG` (format "fg;bg"), fall back to dark.
    pub fn detect() -> Self {
        if let Ok(val) = std::env::var("COLORFGBG")
            && let Some(bg) = val.rsplit(';').next()
            && let Ok(n) = bg.parse::<u8>()
        {
            // ANSI colors 0-6 and 8 are typically dark backgrounds.
            if n > 6 && n != 8 {
                return Background::Light;
            }
        }
        Background::Dark
    }
}

/// Every color slot resolved to a concrete `Color`, from user config or
/// from the defaults for the detected background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub text: Color,
    pub faint: Color,
    pub error: Color,
    pub loading: Color,
    pub link: Color,
    pub border: Color,
    pub depth: ColorDepth,
}

impl ResolvedTheme {
    pub fn resolve(theme: &Theme, bg: Background, depth: ColorDepth) -> Self {
        let d = Self::defaults(bg, depth);
        let c = &theme.colors;
        Self {
            text: c.text.unwrap_or(d.text),
            faint: c.faint.unwrap_or(d.faint),
            error: c.error.unwrap_or(d.error),
            loading: c.loading.unwrap_or(d.loading),
            link: c.link.unwrap_or(d.link),
            border: c.border.unwrap_or(d.border),
            depth,
        }
    }

    fn defaults(bg: Background, depth: ColorDepth) -> Self {
        match bg {
            Background::Dark => Self {
                text: Color::Ansi256(7),
                faint: Color::Ansi256(243),
                error: Color::Ansi256(1),
                loading: Color::Ansi256(11),
                link: Color::Ansi256(12),
                border: Color::Ansi256(244),
                depth,
            },
            Background::Light => Self {
                text: Color::Ansi256(0),
                faint: Color::Ansi256(248),
                error: Color::Ansi256(1),
                loading: Color::Ansi256(3),
                link: Color::Ansi256(4),
                border: Color::Ansi256(240),
                depth,
            },
        }
    }

    /// Convert a theme slot or label color to what the terminal can draw.
    pub fn paint(&self, color: impl Into<Color>) -> crossterm::style::Color {
        color.into().to_crossterm_color(self.depth)
    }

    /// Chip colors for a label: its own background plus contrasting text.
    /// Unparseable label colors fall back to the faint theme color.
    pub fn label_colors(
        &self,
        background: Option<Rgb>,
    ) -> (crossterm::style::Color, crossterm::style::Color) {
        match background {
            Some(bg) => (self.paint(bg), self.paint(bg.contrasting_text())),
            None => (self.paint(self.faint), self.paint(Rgb::WHITE)),
        }
    }
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        Self::resolve(&Theme::default(), Background::Dark, ColorDepth::TrueColor)
    }
}
