//! Color palette for Fundsea's TUI.
//!
//! One opinionated dark theme shared by every pane. Colors are grouped into
//! background layers, text tiers, and semantic accents.

use ratatui::style::Color;

/// Palette used by rendering code.
#[derive(Clone, Copy)]
pub struct Theme {
    /// Primary canvas background.
    pub base: Color,
    /// Slightly lighter layer behind panels.
    pub mantle: Color,
    /// Subtle component surface.
    pub surface: Color,
    /// Muted border/line color.
    pub overlay: Color,
    /// Primary foreground text.
    pub text: Color,
    /// Low-emphasis text (captions, hints).
    pub subtext: Color,
    /// Selection and interactive highlight accent.
    pub accent: Color,
    /// Emphasized headings.
    pub heading: Color,
    /// Success / funded state.
    pub green: Color,
    /// Warning / pending state.
    pub yellow: Color,
    /// Error / failure state.
    pub red: Color,
}

/// Build a [`Color::Rgb`] from an 8-bit triplet; keeps the palette terse.
const fn hex(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Return the application palette.
#[must_use]
pub const fn theme() -> Theme {
    Theme {
        base: hex((0x1e, 0x1e, 0x2e)),
        mantle: hex((0x18, 0x18, 0x25)),
        surface: hex((0x45, 0x47, 0x5a)),
        overlay: hex((0x7f, 0x84, 0x9c)),
        text: hex((0xcd, 0xd6, 0xf4)),
        subtext: hex((0xa6, 0xad, 0xc8)),
        accent: hex((0x74, 0xc7, 0xec)),
        heading: hex((0xcb, 0xa6, 0xf7)),
        green: hex((0xa6, 0xe3, 0xa1)),
        yellow: hex((0xf9, 0xe2, 0xaf)),
        red: hex((0xf3, 0x8b, 0xa8)),
    }
}
