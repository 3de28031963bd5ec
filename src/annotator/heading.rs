//! Heading mark offset
//!
//! Renders the `#` count as a small superscript level indicator at the mark
//! position. The underlying `#` characters stay in place; suppressing them is
//! the mark-hiding unit's job, so the indicator works in both modes.

use super::Annotate;
use crate::config::DecorationConfig;
use crate::decoration::{Decoration, Side, Widget};
use crate::syntax::{NodeTag, SyntaxNode};
use crate::theme::{ThemeRule, ThemeSet};
use crate::view::ViewSnapshot;

const THEME: ThemeSet = ThemeSet {
    name: "heading",
    rules: &[ThemeRule {
        selector: ".ml-heading-level",
        declarations: &[
            ("vertical-align", "super"),
            ("font-size", "0.6em"),
            ("color", "var(--ml-dim)"),
        ],
    }],
};

/// Inserts a superscript level widget at each ATX heading mark
#[derive(Debug, Default)]
pub struct HeadingAnnotator;

impl Annotate for HeadingAnnotator {
    fn decorate(
        &self,
        view: &ViewSnapshot<'_>,
        node: &SyntaxNode,
        _config: &DecorationConfig,
    ) -> Vec<Decoration> {
        let NodeTag::HeadingMark { level } = node.tag else {
            return Vec::new();
        };
        if !node.is_well_formed(view.text.len()) {
            tracing::warn!(from = node.from, to = node.to, "skipping malformed heading mark");
            return Vec::new();
        }
        vec![Decoration::widget(
            node.from,
            Widget::HeadingLevel { level },
            Side::Before,
        )]
    }

    fn theme(&self) -> Option<ThemeSet> {
        Some(THEME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::DecorationKind;
    use crate::parse::parse_document;

    #[test]
    fn test_widget_at_mark_position() {
        let text = "### Deep\n";
        let tree = parse_document(text);
        let view = ViewSnapshot::full(text, &tree);
        let mark = tree
            .nodes()
            .iter()
            .find(|n| matches!(n.tag, NodeTag::HeadingMark { .. }))
            .unwrap();

        let decorations = HeadingAnnotator.decorate(&view, mark, &DecorationConfig::default());
        assert_eq!(decorations.len(), 1);
        assert_eq!(decorations[0].from, 0);
        assert!(matches!(
            decorations[0].kind,
            DecorationKind::Widget {
                widget: Widget::HeadingLevel { level: 3 },
                side: Side::Before,
            }
        ));
    }

    #[test]
    fn test_heading_container_itself_is_ignored() {
        let text = "# Title\n";
        let tree = parse_document(text);
        let view = ViewSnapshot::full(text, &tree);
        let heading = tree
            .nodes()
            .iter()
            .find(|n| matches!(n.tag, NodeTag::Heading { .. }))
            .unwrap();
        assert!(HeadingAnnotator
            .decorate(&view, heading, &DecorationConfig::default())
            .is_empty());
    }
}
