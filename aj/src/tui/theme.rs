//! Light and dark palettes
//!
//! The dark palette follows gruvbox; the light one keeps to plain grays.

use ratatui::style::Color;
use tracing::debug;

use crate::config::ThemePreference;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Colors used by the views
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub focus: Color,
    pub header: Color,
    pub keybind: Color,
    pub dim: Color,
    pub locked: Color,
    pub error: Color,
    pub ok: Color,
    pub popup_bg: Color,
}

impl Theme {
    /// Pick the starting theme from config and the terminal's `COLORFGBG`
    ///
    /// `COLORFGBG` looks like `15;0`; the last field is the background color
    /// index. Indices 7 and 9..=15 are light backgrounds. Anything unreadable
    /// falls back to dark.
    pub fn resolve(preference: ThemePreference, colorfgbg: Option<&str>) -> Self {
        debug!(?preference, ?colorfgbg, "Theme::resolve: called");
        match preference {
            ThemePreference::Light => Self::Light,
            ThemePreference::Dark => Self::Dark,
            ThemePreference::Auto => {
                let bg = colorfgbg
                    .and_then(|v| v.rsplit(';').next())
                    .and_then(|s| s.trim().parse::<u8>().ok());
                match bg {
                    Some(7) | Some(9..=15) => Self::Light,
                    _ => Self::Dark,
                }
            }
        }
    }

    /// Resolve against the current environment
    pub fn detect(preference: ThemePreference) -> Self {
        let colorfgbg = std::env::var("COLORFGBG").ok();
        Self::resolve(preference, colorfgbg.as_deref())
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Header glyph: a sun offers light mode, a moon offers dark mode
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                bg: Color::Rgb(0x28, 0x28, 0x28),
                fg: Color::Rgb(0xeb, 0xdb, 0xb2),
                border: Color::Rgb(0x50, 0x49, 0x45),
                focus: Color::Rgb(0xfa, 0xbd, 0x2f),
                header: Color::Rgb(0x83, 0xa5, 0x98),
                keybind: Color::Rgb(0x8e, 0xc0, 0x7c),
                dim: Color::Rgb(0x92, 0x83, 0x74),
                locked: Color::Rgb(0xfe, 0x80, 0x19),
                error: Color::Rgb(0xfb, 0x49, 0x34),
                ok: Color::Rgb(0xb8, 0xbb, 0x26),
                popup_bg: Color::Rgb(0x3c, 0x38, 0x36),
            },
            Self::Light => Palette {
                bg: Color::Rgb(0xf9, 0xfa, 0xfb),
                fg: Color::Rgb(0x1f, 0x29, 0x37),
                border: Color::Rgb(0xd1, 0xd5, 0xdb),
                focus: Color::Rgb(0x25, 0x63, 0xeb),
                header: Color::Rgb(0x11, 0x18, 0x27),
                keybind: Color::Rgb(0x04, 0x78, 0x57),
                dim: Color::Rgb(0x6b, 0x72, 0x80),
                locked: Color::Rgb(0xc2, 0x41, 0x0c),
                error: Color::Rgb(0xdc, 0x26, 0x26),
                ok: Color::Rgb(0x16, 0xa3, 0x4a),
                popup_bg: Color::Rgb(0xff, 0xff, 0xff),
            },
        }
    }
}
