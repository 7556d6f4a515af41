//! Accent colours and the light/dark panel palettes.

use ratatui::style::Color;

/// One selectable colour scheme. Only the accent changes between themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
}

const fn rgb(hex: u32) -> Theme {
    Theme {
        accent: Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8),
    }
}

pub const THEMES: [Theme; 20] = [
    rgb(0x00e676),
    rgb(0x00b0ff),
    rgb(0xff3d00),
    rgb(0xd4af37),
    rgb(0xbd93f9),
    rgb(0xff79c6),
    rgb(0x8be9fd),
    rgb(0x50fa7b),
    rgb(0xffb86c),
    rgb(0xff5555),
    rgb(0xf1fa8c),
    rgb(0x00d2ff),
    rgb(0x9c27b0),
    rgb(0x76ff03),
    rgb(0xffffff),
    rgb(0xff9800),
    rgb(0x03a9f4),
    rgb(0xe91e63),
    rgb(0x607d8b),
    rgb(0x795548),
];

/// Theme at `index`, wrapping around the table.
pub fn theme(index: usize) -> Theme {
    THEMES[index % THEMES.len()]
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub panel: Color,
    pub text: Color,
    pub border: Color,
}

pub const DARK: Palette = Palette {
    background: Color::Rgb(0x12, 0x12, 0x12),
    panel: Color::Rgb(0x1e, 0x1e, 0x1e),
    text: Color::Rgb(0xff, 0xff, 0xff),
    border: Color::Rgb(0x2a, 0x2a, 0x2a),
};

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(0xe0, 0xe5, 0xec),
    panel: Color::Rgb(0xe0, 0xe5, 0xec),
    text: Color::Rgb(0x33, 0x33, 0x33),
    border: Color::Rgb(0xb8, 0xb9, 0xbe),
};

pub fn palette(is_dark: bool) -> Palette {
    if is_dark { DARK } else { LIGHT }
}
