//! Annotator units: one independent analysis per decoration concern
//!
//! Every unit implements the same capability set (`Annotate`). The shipped set
//! is closed, so the scheduler stores units as a tagged enum and dispatches
//! through it. Stage caches live in the scheduler, keyed by registration
//! index: `decorate` is a pure function of the view, the node, and the
//! configuration, and the scheduler appends its output to the unit's cache
//! slot. A unit must return no decorations for node tags it does not handle.

mod blockquote;
mod code_block;
mod heading;
mod hide_marks;
mod links;
mod lists;

pub use blockquote::BlockquoteAnnotator;
pub use code_block::CodeBlockAnnotator;
pub use heading::HeadingAnnotator;
pub use hide_marks::HideMarksAnnotator;
pub use links::LinkAnnotator;
pub use lists::{ListIndentAnnotator, ListMarkerAnnotator};

use crate::config::DecorationConfig;
use crate::decoration::{Decoration, DecorationSet};
use crate::metrics::GlyphProbe;
use crate::syntax::SyntaxNode;
use crate::theme::ThemeSet;
use crate::view::{HostAction, UiEvent, UpdateEvent, ViewSnapshot};

/// Context handed to `init`: configuration plus the optional glyph probe
pub struct InitContext<'a> {
    pub config: &'a DecorationConfig,
    pub probe: Option<&'a GlyphProbe>,
}

/// Callback invoked by the host event dispatch; returns None when the event
/// is not relevant to the handler
pub type EventCallback = fn(&UiEvent, &ViewSnapshot<'_>) -> Option<HostAction>;

/// A named handler consulted by the host's own event dispatch
#[derive(Clone, Copy)]
pub struct EventHandlerUnit {
    pub event: &'static str,
    pub callback: EventCallback,
}

/// Capability set shared by every annotator unit
pub trait Annotate {
    /// Reset derived constants; idempotent and callable before the first pass
    fn init(&mut self, _ctx: &InitContext<'_>) {}

    /// Decorations for one node encountered during the shared traversal, in
    /// discovery order; empty for irrelevant tags
    fn decorate(
        &self,
        view: &ViewSnapshot<'_>,
        node: &SyntaxNode,
        config: &DecorationConfig,
    ) -> Vec<Decoration>;

    /// Whether this unit must recompute for the given update; when false the
    /// unit's stage cache is reused verbatim
    fn should_recompute(&self, event: &UpdateEvent, _config: &DecorationConfig) -> bool {
        event.needs_recompute()
    }

    /// Whether this unit participates in the filter chain
    fn has_filter(&self) -> bool {
        false
    }

    /// Selection-driven transform over the fully merged collection; pure,
    /// never touches stage caches
    fn filter(&self, _view: &ViewSnapshot<'_>, set: DecorationSet) -> DecorationSet {
        set
    }

    /// Static style rules attached once at assembly
    fn theme(&self) -> Option<ThemeSet> {
        None
    }

    /// Named UI event handlers contributed by this unit
    fn event_handlers(&self) -> Vec<EventHandlerUnit> {
        Vec::new()
    }
}

/// The closed set of shipped annotators
pub enum Annotator {
    CodeBlock(CodeBlockAnnotator),
    Blockquote(BlockquoteAnnotator),
    Heading(HeadingAnnotator),
    HideMarks(HideMarksAnnotator),
    Links(LinkAnnotator),
    ListMarkers(ListMarkerAnnotator),
    ListIndent(ListIndentAnnotator),
}

impl Annotator {
    fn unit(&self) -> &dyn Annotate {
        match self {
            Annotator::CodeBlock(unit) => unit,
            Annotator::Blockquote(unit) => unit,
            Annotator::Heading(unit) => unit,
            Annotator::HideMarks(unit) => unit,
            Annotator::Links(unit) => unit,
            Annotator::ListMarkers(unit) => unit,
            Annotator::ListIndent(unit) => unit,
        }
    }

    fn unit_mut(&mut self) -> &mut dyn Annotate {
        match self {
            Annotator::CodeBlock(unit) => unit,
            Annotator::Blockquote(unit) => unit,
            Annotator::Heading(unit) => unit,
            Annotator::HideMarks(unit) => unit,
            Annotator::Links(unit) => unit,
            Annotator::ListMarkers(unit) => unit,
            Annotator::ListIndent(unit) => unit,
        }
    }
}

impl Annotate for Annotator {
    fn init(&mut self, ctx: &InitContext<'_>) {
        self.unit_mut().init(ctx);
    }

    fn decorate(
        &self,
        view: &ViewSnapshot<'_>,
        node: &SyntaxNode,
        config: &DecorationConfig,
    ) -> Vec<Decoration> {
        self.unit().decorate(view, node, config)
    }

    fn should_recompute(&self, event: &UpdateEvent, config: &DecorationConfig) -> bool {
        self.unit().should_recompute(event, config)
    }

    fn has_filter(&self) -> bool {
        self.unit().has_filter()
    }

    fn filter(&self, view: &ViewSnapshot<'_>, set: DecorationSet) -> DecorationSet {
        self.unit().filter(view, set)
    }

    fn theme(&self) -> Option<ThemeSet> {
        self.unit().theme()
    }

    fn event_handlers(&self) -> Vec<EventHandlerUnit> {
        self.unit().event_handlers()
    }
}
