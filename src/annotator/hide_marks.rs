//! Generic mark hiding gated by configuration
//!
//! Replaces markdown delimiters (heading `#` runs, emphasis markers,
//! inline-code backticks, horizontal rules, link URLs) so the live preview
//! reads like rendered text. Every replacement carries a filter rule; the
//! filter chain re-reveals marks on the selection line, and link URLs while
//! the caret sits inside them. When the toggle is off the unit reports no
//! decorations and no recompute, disabling itself without being unregistered.

use super::Annotate;
use crate::config::DecorationConfig;
use crate::decoration::{Decoration, DecorationSet, FilterRule, Widget};
use crate::syntax::{NodeTag, SyntaxNode};
use crate::theme::{ThemeRule, ThemeSet};
use crate::view::{UpdateEvent, ViewSnapshot};

const THEME: ThemeSet = ThemeSet {
    name: "hide-marks",
    rules: &[ThemeRule {
        selector: ".ml-rule",
        declarations: &[("border-bottom", "1px solid var(--ml-dim)")],
    }],
};

/// Hides markdown delimiters outside the selection
#[derive(Debug, Default)]
pub struct HideMarksAnnotator;

impl Annotate for HideMarksAnnotator {
    fn decorate(
        &self,
        view: &ViewSnapshot<'_>,
        node: &SyntaxNode,
        config: &DecorationConfig,
    ) -> Vec<Decoration> {
        if !config.hide_marks {
            return Vec::new();
        }
        let relevant = matches!(
            node.tag,
            NodeTag::HeadingMark { .. }
                | NodeTag::EmphasisMark
                | NodeTag::CodeMark
                | NodeTag::HorizontalRule
                | NodeTag::Url
        );
        if !relevant {
            return Vec::new();
        }
        if !node.is_well_formed(view.text.len()) || node.from == node.to {
            tracing::warn!(from = node.from, to = node.to, tag = ?node.tag, "skipping malformed mark node");
            return Vec::new();
        }

        match node.tag {
            NodeTag::HorizontalRule => vec![
                Decoration::replace(node.from..node.to, Some(Widget::Rule))
                    .with_filter(FilterRule::OnSelectedLine),
            ],
            NodeTag::Url => vec![
                Decoration::replace(node.from..node.to, None).with_filter(FilterRule::CaretInside),
            ],
            _ => vec![
                Decoration::replace(node.from..node.to, None)
                    .with_filter(FilterRule::OnSelectedLine),
            ],
        }
    }

    fn should_recompute(&self, event: &UpdateEvent, config: &DecorationConfig) -> bool {
        config.hide_marks && event.needs_recompute()
    }

    fn has_filter(&self) -> bool {
        true
    }

    /// Drop line-flagged replacements on the selection line and URL spans the
    /// caret is strictly inside, revealing the raw markdown there
    fn filter(&self, view: &ViewSnapshot<'_>, set: DecorationSet) -> DecorationSet {
        let caret = view.selection.head;
        let caret_line = view.selection_line();
        set.filtered(|d| match d.filter {
            FilterRule::None => true,
            FilterRule::OnSelectedLine => view.lines.line_of(d.from) != caret_line,
            FilterRule::CaretInside => !(caret > d.from && caret < d.to),
        })
    }

    fn theme(&self) -> Option<ThemeSet> {
        Some(THEME)
    }
}
