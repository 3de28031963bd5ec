//! Decoration scheduler: shared traversal, stage caches, merge, filter chain
//!
//! # Design
//! - **One shared traversal**: each recompute walks the visible syntax nodes
//!   once and fans every node out to the registered annotators, so traversal
//!   cost is paid once regardless of annotator count
//! - **Threaded stage caches**: the scheduler owns one cache slot per
//!   annotator and is the only code that clears or appends to it; a clean
//!   annotator's slot is reused verbatim
//! - **Incremental passes**: an update recomputes only the annotators whose
//!   classifier reports dirty, at the cost of re-walking the whole visible
//!   range whenever any annotator is dirty (the walk is not scoped to the
//!   edited region)
//!
//! Schedulers are assembled explicitly through [`SchedulerBuilder`]; the
//! registration lists (themes, filter units, event handlers) are derived once
//! at build time and append-only thereafter.

use crate::annotator::{
    Annotate, Annotator, BlockquoteAnnotator, CodeBlockAnnotator, EventHandlerUnit,
    HeadingAnnotator, HideMarksAnnotator, InitContext, LinkAnnotator, ListIndentAnnotator,
    ListMarkerAnnotator,
};
use crate::config::DecorationConfig;
use crate::decoration::{Decoration, DecorationSet};
use crate::metrics::GlyphProbe;
use crate::theme::ThemeSet;
use crate::view::{HostAction, UiEvent, UpdateEvent, ViewSnapshot};

/// Assembles a [`Scheduler`] from an ordered list of annotators
pub struct SchedulerBuilder {
    config: DecorationConfig,
    probe: Option<Box<GlyphProbe>>,
    annotators: Vec<Annotator>,
    with_filter_chain: bool,
}

impl SchedulerBuilder {
    pub fn new(config: DecorationConfig) -> Self {
        Self {
            config,
            probe: None,
            annotators: Vec::new(),
            with_filter_chain: true,
        }
    }

    /// Register the next annotator; registration order is merge order
    pub fn annotator(mut self, annotator: Annotator) -> Self {
        self.annotators.push(annotator);
        self
    }

    /// Supply the host glyph probe used by measuring annotators
    pub fn glyph_probe(mut self, probe: Box<GlyphProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Skip the filter chain entirely (the simpler sibling view mode)
    pub fn without_filter_chain(mut self) -> Self {
        self.with_filter_chain = false;
        self
    }

    pub fn build(self) -> Scheduler {
        let filter_units = if self.with_filter_chain {
            self.annotators
                .iter()
                .enumerate()
                .filter(|(_, a)| a.has_filter())
                .map(|(i, _)| i)
                .collect()
        } else {
            Vec::new()
        };
        let handler_units = self
            .annotators
            .iter()
            .flat_map(|a| a.event_handlers())
            .collect();
        let themes = self.annotators.iter().filter_map(|a| a.theme()).collect();
        let caches = self.annotators.iter().map(|_| Vec::new()).collect();

        let mut scheduler = Scheduler {
            config: self.config,
            probe: self.probe,
            annotators: self.annotators,
            caches,
            filter_units,
            handler_units,
            themes,
        };
        scheduler.process_init_unit();
        scheduler
    }
}

/// Orchestrates annotators over one host view
pub struct Scheduler {
    config: DecorationConfig,
    probe: Option<Box<GlyphProbe>>,
    annotators: Vec<Annotator>,
    /// Stage caches, parallel to `annotators`; exclusively owned here
    caches: Vec<Vec<Decoration>>,
    /// Registration indices of annotators participating in the filter chain
    filter_units: Vec<usize>,
    handler_units: Vec<EventHandlerUnit>,
    themes: Vec<ThemeSet>,
}

impl Scheduler {
    /// The fully wired live-preview scheduler
    pub fn live_preview(config: DecorationConfig) -> Self {
        SchedulerBuilder::new(config)
            .annotator(Annotator::CodeBlock(CodeBlockAnnotator))
            .annotator(Annotator::Blockquote(BlockquoteAnnotator))
            .annotator(Annotator::Heading(HeadingAnnotator))
            .annotator(Annotator::HideMarks(HideMarksAnnotator))
            .annotator(Annotator::Links(LinkAnnotator))
            .annotator(Annotator::ListMarkers(ListMarkerAnnotator))
            .annotator(Annotator::ListIndent(ListIndentAnnotator::default()))
            .build()
    }

    /// Simpler sibling for the source view mode: block shading and list
    /// indent only, same pass contract, no filter chain
    pub fn source_mode(config: DecorationConfig) -> Self {
        SchedulerBuilder::new(config)
            .annotator(Annotator::CodeBlock(CodeBlockAnnotator))
            .annotator(Annotator::Blockquote(BlockquoteAnnotator))
            .annotator(Annotator::ListIndent(ListIndentAnnotator::default()))
            .without_filter_chain()
            .build()
    }

    pub fn config(&self) -> &DecorationConfig {
        &self.config
    }

    /// Swap the configuration; annotator constants are re-derived and all
    /// caches reset, so the next pass must be a full one
    pub fn set_config(&mut self, config: DecorationConfig) {
        self.config = config;
        self.process_init_unit();
    }

    /// Reset every annotator's derived constants and empty every stage cache
    pub fn process_init_unit(&mut self) {
        let ctx = InitContext {
            config: &self.config,
            probe: self.probe.as_deref(),
        };
        for annotator in &mut self.annotators {
            annotator.init(&ctx);
        }
        for cache in &mut self.caches {
            cache.clear();
        }
    }

    /// Full pass: recompute every annotator over the visible ranges
    pub fn process_decoration(&mut self, view: &ViewSnapshot<'_>) -> DecorationSet {
        for cache in &mut self.caches {
            cache.clear();
        }
        let all: Vec<usize> = (0..self.annotators.len()).collect();
        self.traverse(view, &all);
        self.merged()
    }

    /// Incremental pass: recompute only the annotators dirtied by `event`,
    /// reusing every clean annotator's stage cache verbatim
    pub fn process_decoration_update(
        &mut self,
        view: &ViewSnapshot<'_>,
        event: &UpdateEvent,
    ) -> DecorationSet {
        let dirty: Vec<usize> = self
            .annotators
            .iter()
            .enumerate()
            .filter(|(_, a)| a.should_recompute(event, &self.config))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(
            dirty = dirty.len(),
            total = self.annotators.len(),
            "incremental decoration pass"
        );

        for &i in &dirty {
            self.caches[i].clear();
        }
        if !dirty.is_empty() {
            self.traverse(view, &dirty);
        }
        self.merged()
    }

    /// True when at least one registered unit participates in filtering
    pub fn need_filter(&self) -> bool {
        !self.filter_units.is_empty()
    }

    /// Thread the merged collection through each filter unit in registration
    /// order; identity when no filter units are registered
    pub fn process_decoration_filter(
        &self,
        view: &ViewSnapshot<'_>,
        set: DecorationSet,
    ) -> DecorationSet {
        let mut set = set;
        for &i in &self.filter_units {
            set = self.annotators[i].filter(view, set);
        }
        set
    }

    /// Static style registrations, applied once at view construction
    pub fn themes(&self) -> &[ThemeSet] {
        &self.themes
    }

    /// Named handlers consulted by the host's own event dispatch
    pub fn event_handler_units(&self) -> &[EventHandlerUnit] {
        &self.handler_units
    }

    /// Try handlers for the event's name in registration order; the first
    /// handler that claims the event wins
    pub fn dispatch_event(&self, event: &UiEvent, view: &ViewSnapshot<'_>) -> Option<HostAction> {
        self.handler_units
            .iter()
            .filter(|unit| unit.event == event.name)
            .find_map(|unit| (unit.callback)(event, view))
    }

    /// Read-only view of one annotator's stage cache
    pub fn stage_cache(&self, index: usize) -> &[Decoration] {
        &self.caches[index]
    }

    pub fn annotator_count(&self) -> usize {
        self.annotators.len()
    }

    /// One shared walk over the visible ranges, fanning each node out to the
    /// annotators at `indices` and appending their output to the stage caches
    fn traverse(&mut self, view: &ViewSnapshot<'_>, indices: &[usize]) {
        for range in &view.visible_ranges {
            let end = range.end.min(view.tree.valid_to());
            if range.start >= end {
                continue;
            }
            for node in view.tree.nodes_in(range.start..end) {
                for &i in indices {
                    let produced = self.annotators[i].decorate(view, node, &self.config);
                    self.caches[i].extend(produced);
                }
            }
        }
    }

    /// Concatenate stage caches in registration order and sort
    fn merged(&self) -> DecorationSet {
        let total = self.caches.iter().map(Vec::len).sum();
        let mut items = Vec::with_capacity(total);
        for cache in &self.caches {
            items.extend(cache.iter().cloned());
        }
        DecorationSet::from_unsorted(items)
    }
}
