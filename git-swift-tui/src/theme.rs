use git_swift_core::config::{NamedColor, ThemeColor, ThemeConfig};
use ratatui::style::Color;

pub struct Theme {
    pub prompt: Color,
    pub matched: Color,
    pub selected: Color,
    pub current: Color,
    pub muted: Color,
    pub error: Color,
    pub warning: Color,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            prompt: to_ratatui_color(&config.prompt),
            matched: to_ratatui_color(&config.matched),
            selected: to_ratatui_color(&config.selected),
            current: to_ratatui_color(&config.current),
            muted: to_ratatui_color(&config.muted),
            error: to_ratatui_color(&config.error),
            warning: to_ratatui_color(&config.warning),
        }
    }
}

fn to_ratatui_color(color: &ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb(*r, *g, *b),
        ThemeColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
            NamedColor::Gray => Color::Gray,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = Theme::from_config(&ThemeConfig::default());
        assert_eq!(theme.prompt, Color::Rgb(0x87, 0xce, 0xeb));
        assert_eq!(theme.matched, Color::Cyan);
        assert_eq!(theme.selected, Color::Rgb(0x87, 0xce, 0xeb));
        assert_eq!(theme.current, Color::Rgb(0xd0, 0xd0, 0xd0));
        assert_eq!(theme.muted, Color::Rgb(0x6c, 0x6c, 0x6c));
        assert_eq!(theme.error, Color::Red);
        assert_eq!(theme.warning, Color::Yellow);
    }

    #[test]
    fn test_theme_custom() {
        let config = ThemeConfig {
            matched: ThemeColor::Named(NamedColor::Magenta),
            current: ThemeColor::Rgb(255, 0, 255),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.matched, Color::Magenta);
        assert_eq!(theme.current, Color::Rgb(255, 0, 255));
        assert_eq!(theme.error, Color::Red); // default
    }
}
