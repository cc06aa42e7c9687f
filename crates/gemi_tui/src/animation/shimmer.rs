//! Shimmer animation: a highlight sweeping left to right over text.
//!
//! Drawn over the typing placeholder while an exchange is pending.

use std::time::{Duration, Instant};

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::theme::{GemiPalette, Rgb};

/// Width of the highlight as a fraction of the text length.
const SHIMMER_WIDTH: f64 = 0.35;

/// Fraction of the text the highlight travels per second.
const SHIMMER_SPEED: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct Shimmer {
    /// Center of the highlight (0.0 = left, 1.0 = right).
    position: f64,
    last_tick: Instant,
}

impl Default for Shimmer {
    fn default() -> Self {
        Self {
            position: 0.0,
            last_tick: Instant::now(),
        }
    }
}

impl Shimmer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by the wall time since the last tick. Call once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.advance(elapsed);
    }

    /// Advance by a fixed amount of time. Large gaps are capped so the sweep never jumps.
    pub fn advance(&mut self, elapsed: Duration) {
        let delta = (elapsed.as_secs_f64() * SHIMMER_SPEED).min(0.1);
        self.position += delta;
        if self.position > 1.0 + SHIMMER_WIDTH {
            self.position -= 1.0 + SHIMMER_WIDTH;
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// One span per character, blended from `text_muted` to `accent` by distance to the highlight.
    pub fn styled_spans(&self, text: &str, palette: &GemiPalette) -> Vec<Span<'static>> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return vec![];
        }
        let n = chars.len() as f64;
        let half_width = SHIMMER_WIDTH / 2.0;
        let center = self.position * (1.0 + 2.0 * half_width) - half_width;

        chars
            .into_iter()
            .enumerate()
            .map(|(i, c)| {
                let char_pos = (i as f64 + 0.5) / n;
                let distance = (char_pos - center).abs();
                let intensity = if distance <= half_width {
                    let t = distance / half_width;
                    1.0 - t * t
                } else {
                    0.0
                };
                let style = Style::default()
                    .fg(blend(palette.text_muted, palette.accent, intensity))
                    .add_modifier(Modifier::BOLD);
                Span::styled(c.to_string(), style)
            })
            .collect()
    }
}

fn blend(from: Rgb, to: Rgb, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let (r0, g0, b0) = from.tuple();
    let (r1, g1, b1) = to.tuple();
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Color::Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}
