//! Debounced document outline
//!
//! The navigation sidebar recomputes over the whole document, not the
//! viewport, and is too expensive to rebuild per keystroke. Edits are
//! coalesced behind a trailing 500 ms deadline: every qualifying edit cancels
//! and re-arms the timer, only the trailing edge fires, and a fast burst
//! produces exactly one rebuild. The deadline is explicit state driven by
//! caller-supplied instants, so firing stays deterministic and on the host's
//! own event loop.

use crate::syntax::{NodeTag, SyntaxTree};
use crate::text::LineIndex;
use std::time::{Duration, Instant};

/// Trailing debounce window for outline rebuilds
pub const OUTLINE_DEBOUNCE: Duration = Duration::from_millis(500);

/// One heading in the navigation outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: u8,
    pub title: String,
    pub line: usize,
    pub offset: usize,
}

/// Coalesces an edit burst into a single deferred rebuild request
#[derive(Debug, Default)]
pub struct OutlineDebounce {
    /// Minimum edited offset seen since the last flush
    min_edited: Option<usize>,
    deadline: Option<Instant>,
}

impl OutlineDebounce {
    /// Record an edit and (re)arm the trailing deadline
    pub fn note_edit(&mut self, offset: usize, now: Instant) {
        self.min_edited = Some(self.min_edited.map_or(offset, |m| m.min(offset)));
        self.deadline = Some(now + OUTLINE_DEBOUNCE);
    }

    /// Minimum edited offset if the deadline has passed; firing resets the tracker
    pub fn poll(&mut self, now: Instant) -> Option<usize> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.min_edited.take()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Outline entries for the whole document, in document order
pub fn compute_outline(text: &str, lines: &LineIndex, tree: &SyntaxTree) -> Vec<OutlineEntry> {
    tree.nodes()
        .iter()
        .filter_map(|node| {
            let NodeTag::Heading { level } = node.tag else {
                return None;
            };
            let raw = text.get(node.from..node.to)?;
            Some(OutlineEntry {
                level,
                title: heading_title(raw),
                line: lines.line_of(node.from),
                offset: node.from,
            })
        })
        .collect()
}

/// Heading text with the ATX marks and surrounding whitespace stripped
fn heading_title(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('#')
        .trim_end_matches('#')
        .trim()
        .to_string()
}

/// Owns the published outline and its debounce state
#[derive(Debug, Default)]
pub struct OutlineTracker {
    entries: Vec<OutlineEntry>,
    debounce: OutlineDebounce,
}

impl OutlineTracker {
    /// Record a document edit at `offset`
    pub fn note_edit(&mut self, offset: usize, now: Instant) {
        self.debounce.note_edit(offset, now);
    }

    /// Flush if the deadline has passed: rebuild entries from the minimum
    /// edited line onward, keep unaffected entries before it, publish, and
    /// reset the tracker. Returns true when a new outline was published.
    pub fn poll(
        &mut self,
        text: &str,
        lines: &LineIndex,
        tree: &SyntaxTree,
        now: Instant,
    ) -> bool {
        let Some(min_offset) = self.debounce.poll(now) else {
            return false;
        };
        let min_line = lines.line_of(min_offset);
        let fresh = compute_outline(text, lines, tree);

        let mut next: Vec<OutlineEntry> = self
            .entries
            .iter()
            .filter(|e| e.line < min_line)
            .cloned()
            .collect();
        next.extend(fresh.into_iter().filter(|e| e.line >= min_line));
        self.entries = next;
        true
    }

    /// Immediate full rebuild, bypassing the debounce (initial document load)
    pub fn rebuild(&mut self, text: &str, lines: &LineIndex, tree: &SyntaxTree) {
        self.entries = compute_outline(text, lines, tree);
        self.debounce = OutlineDebounce::default();
    }

    pub fn entries(&self) -> &[OutlineEntry] {
        &self.entries
    }
}
