//! List marker alignment
//!
//! Two complementary units. `ListMarkerAnnotator` replaces the source marker
//! with a pre-rendered, right-aligned label so `9.` and `10.` line up.
//! `ListIndentAnnotator` tags the item's first line with the measured width of
//! everything up to the content column, so wrapped lines indent under the
//! marker; it re-measures its glyph table on `init` (fonts may have changed).

use super::{Annotate, InitContext};
use crate::config::DecorationConfig;
use crate::decoration::{Decoration, LineClass, Widget};
use crate::metrics::MarkerMetrics;
use crate::syntax::{NodeTag, SyntaxNode};
use crate::theme::{ThemeRule, ThemeSet};
use crate::view::ViewSnapshot;

const MARKER_THEME: ThemeSet = ThemeSet {
    name: "list-marker",
    rules: &[ThemeRule {
        selector: ".ml-list-label",
        declarations: &[("text-align", "right"), ("color", "var(--ml-dim)")],
    }],
};

/// Replaces ordered/unordered list markers with a pre-rendered label
#[derive(Debug, Default)]
pub struct ListMarkerAnnotator;

impl Annotate for ListMarkerAnnotator {
    fn decorate(
        &self,
        view: &ViewSnapshot<'_>,
        node: &SyntaxNode,
        _config: &DecorationConfig,
    ) -> Vec<Decoration> {
        let NodeTag::ListMark { ordered } = node.tag else {
            return Vec::new();
        };
        if !node.is_well_formed(view.text.len()) || node.from == node.to {
            tracing::warn!(from = node.from, to = node.to, "skipping malformed list marker");
            return Vec::new();
        }
        let Some(text) = view.text.get(node.from..node.to) else {
            tracing::warn!(from = node.from, to = node.to, "list marker range splits a character");
            return Vec::new();
        };

        vec![Decoration::replace(
            node.from..node.to,
            Some(Widget::ListLabel {
                text: text.to_string(),
                ordered,
            }),
        )]
    }

    fn theme(&self) -> Option<ThemeSet> {
        Some(MARKER_THEME)
    }
}

/// Tags list-item lines with the measured hanging indent under the marker
#[derive(Debug, Default)]
pub struct ListIndentAnnotator {
    metrics: MarkerMetrics,
}

impl Annotate for ListIndentAnnotator {
    fn init(&mut self, ctx: &InitContext<'_>) {
        self.metrics = MarkerMetrics::measure(ctx.probe);
    }

    fn decorate(
        &self,
        view: &ViewSnapshot<'_>,
        node: &SyntaxNode,
        _config: &DecorationConfig,
    ) -> Vec<Decoration> {
        let NodeTag::ListMark { .. } = node.tag else {
            return Vec::new();
        };
        if !node.is_well_formed(view.text.len()) || node.from == node.to {
            return Vec::new();
        }

        let line = view.lines.line_of(node.from);
        let Some(line_start) = view.lines.line_start(line) else {
            return Vec::new();
        };
        let Some(lead) = view.text.get(line_start..node.from) else {
            return Vec::new();
        };
        let Some(marker) = view.text.get(node.from..node.to) else {
            return Vec::new();
        };

        // Indent = leading columns + marker + the separating space, in px
        let pad_px = self.metrics.text_width(lead)
            + self.metrics.text_width(marker)
            + self.metrics.advance(' ');
        let pad = (pad_px * 100.0).round() as u32;

        vec![Decoration::line(line_start, LineClass::ListIndent { pad })]
    }
}
