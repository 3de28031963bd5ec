//! Blockquote shading with start/end line marking

use super::Annotate;
use crate::config::DecorationConfig;
use crate::decoration::{Decoration, LineClass};
use crate::syntax::{NodeTag, SyntaxNode};
use crate::theme::{ThemeRule, ThemeSet};
use crate::view::ViewSnapshot;

const THEME: ThemeSet = ThemeSet {
    name: "blockquote",
    rules: &[
        ThemeRule {
            selector: ".ml-blockquote",
            declarations: &[
                ("background", "var(--ml-quote-bg)"),
                ("border-left", "3px solid var(--ml-quote-border)"),
            ],
        },
        ThemeRule {
            selector: ".ml-blockquote-start",
            declarations: &[("border-top-left-radius", "4px")],
        },
        ThemeRule {
            selector: ".ml-blockquote-end",
            declarations: &[("border-bottom-left-radius", "4px")],
        },
    ],
};

/// Shades every line of a blockquote and marks its first and last line
#[derive(Debug, Default)]
pub struct BlockquoteAnnotator;

impl Annotate for BlockquoteAnnotator {
    fn decorate(
        &self,
        view: &ViewSnapshot<'_>,
        node: &SyntaxNode,
        _config: &DecorationConfig,
    ) -> Vec<Decoration> {
        if node.tag != NodeTag::Blockquote {
            return Vec::new();
        }
        if !node.is_well_formed(view.text.len()) || node.from == node.to {
            tracing::warn!(from = node.from, to = node.to, "skipping malformed blockquote node");
            return Vec::new();
        }

        let first = view.lines.line_of(node.from);
        let last = view.lines.line_of(node.to - 1);
        let mut out = Vec::new();
        for line in first..=last {
            let Some(start) = view.lines.line_start(line) else {
                break;
            };
            out.push(Decoration::line(start, LineClass::Blockquote));
            if line == first {
                out.push(Decoration::line(start, LineClass::BlockquoteStart));
            }
            if line == last {
                out.push(Decoration::line(start, LineClass::BlockquoteEnd));
            }
        }
        out
    }

    fn theme(&self) -> Option<ThemeSet> {
        Some(THEME)
    }
}
