//! Colour palettes for the light and dark themes.
//!
//! `Auto` asks the terminal for its preference on every resolve, so a
//! changed `COLORFGBG` takes effect on the next frame.

use ratatui::style::Color;

use codereview_config::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPreference {
    Light,
    Dark,
}

/// Colour tokens used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub bg_elev: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub user: Color,
    pub bot: Color,
    pub code_bg: Color,
    pub error: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        bg: Color::Rgb(0xf7, 0xf9, 0xfc),
        bg_elev: Color::Rgb(0xff, 0xff, 0xff),
        text: Color::Rgb(0x0b, 0x12, 0x20),
        muted: Color::Rgb(0x3b, 0x45, 0x55),
        border: Color::Rgb(0xe2, 0xe5, 0xea),
        accent: Color::Rgb(0x25, 0x63, 0xeb),
        user: Color::Rgb(0x1d, 0x4e, 0xd8),
        bot: Color::Rgb(0x04, 0x78, 0x57),
        code_bg: Color::Rgb(0xee, 0xf1, 0xf6),
        error: Color::Rgb(0xb9, 0x1c, 0x1c),
    };

    pub const DARK: Palette = Palette {
        bg: Color::Rgb(0x0b, 0x10, 0x20),
        bg_elev: Color::Rgb(0x0e, 0x15, 0x28),
        text: Color::Rgb(0xe6, 0xee, 0xf6),
        muted: Color::Rgb(0x9a, 0xa4, 0xb2),
        border: Color::Rgb(0x1f, 0x26, 0x37),
        accent: Color::Rgb(0x60, 0xa5, 0xfa),
        user: Color::Rgb(0x93, 0xc5, 0xfd),
        bot: Color::Rgb(0x6e, 0xe7, 0xb7),
        code_bg: Color::Rgb(0x0c, 0x14, 0x26),
        error: Color::Rgb(0xf8, 0x71, 0x71),
    };
}

/// Parse `COLORFGBG` (`"fg;bg"` or `"fg;default;bg"`). Background colours 7
/// and 15 are the light ones; anything unreadable counts as dark.
pub fn system_preference_from(colorfgbg: Option<&str>) -> SystemPreference {
    let background = colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(7) | Some(15) => SystemPreference::Light,
        _ => SystemPreference::Dark,
    }
}

pub fn detect_system_preference() -> SystemPreference {
    system_preference_from(std::env::var("COLORFGBG").ok().as_deref())
}

pub fn resolve(mode: ThemeMode, system: SystemPreference) -> Palette {
    match (mode, system) {
        (ThemeMode::Light, _) | (ThemeMode::Auto, SystemPreference::Light) => Palette::LIGHT,
        (ThemeMode::Dark, _) | (ThemeMode::Auto, SystemPreference::Dark) => Palette::DARK,
    }
}

/// Palette for `mode`, querying the system preference when it is `Auto`.
pub fn palette_for(mode: ThemeMode) -> Palette {
    resolve(mode, detect_system_preference())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_modes_ignore_system() {
        assert_eq!(resolve(ThemeMode::Light, SystemPreference::Dark), Palette::LIGHT);
        assert_eq!(resolve(ThemeMode::Dark, SystemPreference::Light), Palette::DARK);
    }

    #[test]
    fn test_auto_follows_system() {
        assert_eq!(resolve(ThemeMode::Auto, SystemPreference::Light), Palette::LIGHT);
        assert_eq!(resolve(ThemeMode::Auto, SystemPreference::Dark), Palette::DARK);
    }

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(system_preference_from(Some("0;15")), SystemPreference::Light);
        assert_eq!(system_preference_from(Some("0;default;7")), SystemPreference::Light);
        assert_eq!(system_preference_from(Some("15;0")), SystemPreference::Dark);
        assert_eq!(system_preference_from(Some("garbage")), SystemPreference::Dark);
        assert_eq!(system_preference_from(None), SystemPreference::Dark);
    }
}
