//! Theme for the studio screen.
//!
//! A small palette with dark and light variants plus a no-color mode that
//! only uses modifiers.

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use std::sync::RwLock;

/// Marker drawn next to the cursor row of a list
pub const LIST_HIGHLIGHT_SYMBOL: &str = "» ";

static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Install the global theme (once at startup)
pub fn init_theme(theme_type: ThemeType) {
    if let Ok(mut theme) = THEME.write() {
        *theme = Theme::new(theme_type);
    }
}

/// Current theme
pub fn theme() -> Theme {
    THEME
        .read()
        .map(|t| t.clone())
        .unwrap_or_else(|_| Theme::dark())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// Equivalent to `NO_COLOR=1` / `--no-colors`
    NoColor,
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_emphasis: Color,
    pub border: Color,
    pub highlight_bg: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::NoColor => Self::no_color(),
        }
    }

    pub const fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            primary: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            text: Color::White,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Yellow,
            border: Color::DarkGray,
            highlight_bg: Color::DarkGray,
        }
    }

    pub const fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            primary: Color::Blue,
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            error: Color::Red,
            text: Color::Black,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Blue,
            border: Color::DarkGray,
            highlight_bg: Color::Gray,
        }
    }

    pub const fn no_color() -> Self {
        Self {
            theme_type: ThemeType::NoColor,
            primary: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            error: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            text_emphasis: Color::Reset,
            border: Color::Reset,
            highlight_bg: Color::Reset,
        }
    }

    fn colorless(&self) -> bool {
        self.theme_type == ThemeType::NoColor
    }

    pub fn title_style(&self) -> Style {
        if self.colorless() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        if self.colorless() {
            return Style::default();
        }
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        if self.colorless() {
            return Style::default().add_modifier(Modifier::DIM);
        }
        Style::default().fg(self.text_muted)
    }

    pub fn emphasis_style(&self) -> Style {
        if self.colorless() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.text_emphasis)
    }

    pub fn success_style(&self) -> Style {
        if self.colorless() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.success)
    }

    pub fn border_style(&self) -> Style {
        if self.colorless() {
            return Style::default();
        }
        Style::default().fg(self.border)
    }

    pub fn border_focused_style(&self) -> Style {
        if self.colorless() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.primary)
    }

    /// Cursor row of a list
    pub fn highlight_style(&self) -> Style {
        if self.colorless() {
            return Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Style::default()
            .fg(self.text_emphasis)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_type_from_str() {
        assert_eq!("dark".parse::<ThemeType>().unwrap(), ThemeType::Dark);
        assert_eq!("LIGHT".parse::<ThemeType>().unwrap(), ThemeType::Light);
        assert_eq!("no-color".parse::<ThemeType>().unwrap(), ThemeType::NoColor);
        assert_eq!("whatever".parse::<ThemeType>().unwrap(), ThemeType::Dark);
    }

    #[test]
    fn test_no_color_theme_styles_do_not_set_colors() {
        let t = Theme::new(ThemeType::NoColor);
        let s = t.highlight_style();
        assert!(s.fg.is_none());
        assert!(s.bg.is_none());
    }
}
