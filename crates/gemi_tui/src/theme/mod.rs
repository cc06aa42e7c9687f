//! Gemi theme: semantic color palette for the terminal chat.
//!
//! ```ignore
//! use gemi_tui::theme::{Appearance, GemiPalette};
//!
//! let palette = GemiPalette::for_appearance("light".parse().unwrap_or_default());
//! let text = palette.text.tuple();
//! ```

mod appearance;
mod palette;
mod rgb;

pub use appearance::Appearance;
pub use palette::GemiPalette;
pub use rgb::Rgb;
