//! Fenced code block shading

use super::Annotate;
use crate::config::DecorationConfig;
use crate::decoration::{Decoration, LineClass};
use crate::syntax::{NodeTag, SyntaxNode};
use crate::theme::{ThemeRule, ThemeSet};
use crate::view::ViewSnapshot;

const THEME: ThemeSet = ThemeSet {
    name: "code-block",
    rules: &[ThemeRule {
        selector: ".ml-code-block",
        declarations: &[
            ("background", "var(--ml-code-bg)"),
            ("font-family", "var(--ml-mono-font)"),
        ],
    }],
};

/// Shades every line of a fenced code block
#[derive(Debug, Default)]
pub struct CodeBlockAnnotator;

impl Annotate for CodeBlockAnnotator {
    fn decorate(
        &self,
        view: &ViewSnapshot<'_>,
        node: &SyntaxNode,
        _config: &DecorationConfig,
    ) -> Vec<Decoration> {
        if node.tag != NodeTag::FencedCode {
            return Vec::new();
        }
        if !node.is_well_formed(view.text.len()) || node.from == node.to {
            tracing::warn!(from = node.from, to = node.to, "skipping malformed code block node");
            return Vec::new();
        }

        let first = view.lines.line_of(node.from);
        let last = view.lines.line_of(node.to - 1);
        let mut out = Vec::new();
        for line in first..=last {
            let Some(start) = view.lines.line_start(line) else {
                break;
            };
            out.push(Decoration::line(start, LineClass::CodeBlock));
        }
        out
    }

    fn theme(&self) -> Option<ThemeSet> {
        Some(THEME)
    }
}
