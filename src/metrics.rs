//! Measured glyph advances for list-marker alignment
//!
//! The hanging indent under a wrapped list line must match the rendered width
//! of the marker, which depends on the host font. The host may supply a probe
//! at assembly; when probing is unavailable (or fails for a character) the
//! widths fall back to a `unicode-width`-derived monospace estimate, so
//! measurement failures never break `init`.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use unicode_width::UnicodeWidthChar;

/// Host-supplied glyph advance probe, in pixels
pub type GlyphProbe = dyn Fn(char) -> Option<f32> + Send + Sync;

/// Assumed cell width when no probe is available
const FALLBACK_CELL_PX: f32 = 8.0;

/// Characters that can appear in a list marker
const MARKER_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', ')', '-', '*', '+', ' ',
];

/// Measured advance widths for the marker character set
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerMetrics {
    widths: HashMap<char, f32>,
}

impl MarkerMetrics {
    /// Probe the host for marker glyph widths, falling back per character
    pub fn measure(probe: Option<&GlyphProbe>) -> Self {
        let mut widths = HashMap::with_capacity(MARKER_CHARS.len());
        for &ch in MARKER_CHARS {
            let measured = probe.and_then(|p| p(ch));
            widths.insert(ch, measured.unwrap_or_else(|| fallback_advance(ch)));
        }
        Self { widths }
    }

    /// Advance width of one character, in pixels
    pub fn advance(&self, ch: char) -> f32 {
        self.widths
            .get(&ch)
            .copied()
            .unwrap_or_else(|| fallback_advance(ch))
    }

    /// Summed advance width of a string, in pixels
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.advance(c)).sum()
    }
}

impl Default for MarkerMetrics {
    fn default() -> Self {
        FALLBACK.clone()
    }
}

/// Shared fallback table used until an annotator sees a probe
static FALLBACK: Lazy<MarkerMetrics> = Lazy::new(|| MarkerMetrics::measure(None));

fn fallback_advance(ch: char) -> f32 {
    ch.width().unwrap_or(1) as f32 * FALLBACK_CELL_PX
}
