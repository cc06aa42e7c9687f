//! Gemi palette: semantic color roles (surfaces, borders, text, semantic states, chrome).

use super::Appearance;
use super::rgb::Rgb;

/// One full palette for an appearance. All colors are semantic roles.
#[derive(Clone, Debug, PartialEq)]
pub struct GemiPalette {
    // --- Surfaces
    pub background: Rgb,
    pub surface_background: Rgb,

    // --- Borders
    pub border: Rgb,
    pub border_focused: Rgb,

    // --- Elements
    /// Inline code and media card fill.
    pub element_background: Rgb,

    // --- Text
    pub text: Rgb,
    pub text_muted: Rgb,
    pub text_placeholder: Rgb,
    pub text_disabled: Rgb,

    // --- Semantic
    pub accent: Rgb,
    pub danger: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub info: Rgb,

    // --- UI chrome
    pub status_bar_background: Rgb,
    pub scrollbar_thumb: Rgb,
    pub scrollbar_track: Rgb,

    // --- Code blocks
    pub editor_foreground: Rgb,
    pub editor_line_number: Rgb,
}

impl GemiPalette {
    pub fn gemi_dark() -> Self {
        Self {
            background: Rgb(10, 10, 14),
            surface_background: Rgb(17, 18, 25),
            border: Rgb(30, 32, 44),
            border_focused: Rgb(138, 120, 255),
            element_background: Rgb(28, 29, 40),
            text: Rgb(214, 218, 240),
            text_muted: Rgb(82, 88, 118),
            text_placeholder: Rgb(82, 88, 118),
            text_disabled: Rgb(60, 64, 96),
            accent: Rgb(138, 120, 255),
            danger: Rgb(255, 104, 120),
            success: Rgb(120, 220, 140),
            warning: Rgb(240, 190, 100),
            info: Rgb(100, 200, 255),
            status_bar_background: Rgb(17, 18, 25),
            scrollbar_thumb: Rgb(90, 96, 140),
            scrollbar_track: Rgb(18, 18, 27),
            editor_foreground: Rgb(214, 218, 240),
            editor_line_number: Rgb(82, 88, 118),
        }
    }

    pub fn gemi_light() -> Self {
        Self {
            background: Rgb(255, 255, 255),
            surface_background: Rgb(250, 250, 252),
            border: Rgb(228, 228, 234),
            border_focused: Rgb(112, 92, 230),
            element_background: Rgb(242, 242, 246),
            text: Rgb(28, 28, 40),
            text_muted: Rgb(96, 100, 136),
            text_placeholder: Rgb(96, 100, 136),
            text_disabled: Rgb(160, 160, 172),
            accent: Rgb(112, 92, 230),
            danger: Rgb(222, 70, 96),
            success: Rgb(60, 150, 80),
            warning: Rgb(200, 140, 40),
            info: Rgb(40, 140, 200),
            status_bar_background: Rgb(255, 255, 255),
            scrollbar_thumb: Rgb(170, 170, 184),
            scrollbar_track: Rgb(246, 246, 248),
            editor_foreground: Rgb(28, 28, 40),
            editor_line_number: Rgb(96, 100, 136),
        }
    }

    pub fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Dark => Self::gemi_dark(),
            Appearance::Light => Self::gemi_light(),
        }
    }
}
