//! Clickable link badges
//!
//! Inserts a badge widget after each link and contributes the click handler
//! the host dispatch consults. The handler decides relevance itself by
//! inspecting the event's target widget; the scheduler does no filtering.

use super::{Annotate, EventHandlerUnit};
use crate::config::DecorationConfig;
use crate::decoration::{Decoration, Side, Widget};
use crate::syntax::{NodeTag, SyntaxNode};
use crate::theme::{ThemeRule, ThemeSet};
use crate::view::{HostAction, UiEvent, ViewSnapshot};

const THEME: ThemeSet = ThemeSet {
    name: "link",
    rules: &[ThemeRule {
        selector: ".ml-link-badge",
        declarations: &[
            ("cursor", "pointer"),
            ("color", "var(--ml-accent)"),
            ("font-size", "0.8em"),
        ],
    }],
};

/// Inserts a clickable badge widget after each inline link
#[derive(Debug, Default)]
pub struct LinkAnnotator;

impl Annotate for LinkAnnotator {
    fn decorate(
        &self,
        view: &ViewSnapshot<'_>,
        node: &SyntaxNode,
        _config: &DecorationConfig,
    ) -> Vec<Decoration> {
        if node.tag != NodeTag::Link {
            return Vec::new();
        }
        if !node.is_well_formed(view.text.len()) {
            tracing::warn!(from = node.from, to = node.to, "skipping malformed link node");
            return Vec::new();
        }

        // The destination is the Url child recorded inside the link's range
        let url = view
            .tree
            .nodes_in(node.from..node.to)
            .find(|n| n.tag == NodeTag::Url && n.from >= node.from && n.to <= node.to)
            .and_then(|n| view.text.get(n.from..n.to));
        let Some(url) = url else {
            // Reference-style and autolinks carry no inline destination span
            return Vec::new();
        };

        vec![Decoration::widget(
            node.to,
            Widget::LinkBadge {
                url: url.to_string(),
            },
            Side::After,
        )]
    }

    fn theme(&self) -> Option<ThemeSet> {
        Some(THEME)
    }

    fn event_handlers(&self) -> Vec<EventHandlerUnit> {
        vec![EventHandlerUnit {
            event: "click",
            callback: on_click,
        }]
    }
}

fn on_click(event: &UiEvent, _view: &ViewSnapshot<'_>) -> Option<HostAction> {
    match &event.widget {
        Some(Widget::LinkBadge { url }) => Some(HostAction::OpenLink { url: url.clone() }),
        _ => None,
    }
}
