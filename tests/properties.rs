//! Property tests over generated documents and edit sequences.

mod common;

use marklight::{
    parse_document, DecorationConfig, Scheduler, Selection, UpdateEvent, ViewSnapshot,
};
use proptest::prelude::*;

/// Markdown-shaped line pool; documents are random stacks of these
fn line_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "# Title",
        "## Section",
        "### Deep ###",
        "plain text line",
        "*emphasis* and **strong**",
        "`inline code` here",
        "- bullet item",
        "1. numbered item",
        "> quoted line",
        "```",
        "let x = 1;",
        "[label](http://example.com)",
        "---",
        "",
    ])
}

fn doc_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 1..14).prop_map(|lines| {
        let mut doc = lines.join("\n");
        doc.push('\n');
        doc
    })
}

fn docs_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(doc_strategy(), 2..5)
}

proptest! {
    /// Step-by-step incremental passes converge to the same collection a
    /// from-scratch full pass produces on the final document
    #[test]
    fn incremental_matches_full_recompute(docs in docs_strategy()) {
        common::init_tracing_from_env();
        let config = DecorationConfig { hide_marks: true };
        let trees: Vec<_> = docs.iter().map(|d| parse_document(d)).collect();

        let mut scheduler = Scheduler::live_preview(config);
        let mut set = scheduler.process_decoration(&ViewSnapshot::full(&docs[0], &trees[0]));
        for i in 1..docs.len() {
            let view = ViewSnapshot::full(&docs[i], &trees[i]);
            let event = UpdateEvent {
                doc_changed: true,
                viewport_changed: false,
                selection_set: false,
                prev_tree: trees[i - 1].id(),
                tree: trees[i].id(),
            };
            set = scheduler.process_decoration_update(&view, &event);
        }

        let last = docs.len() - 1;
        let fresh = Scheduler::live_preview(config)
            .process_decoration(&ViewSnapshot::full(&docs[last], &trees[last]));
        prop_assert_eq!(set, fresh);
    }

    /// Two independently assembled schedulers agree on any document
    #[test]
    fn full_pass_is_deterministic(doc in doc_strategy()) {
        let config = DecorationConfig { hide_marks: true };
        let tree = parse_document(&doc);
        let view = ViewSnapshot::full(&doc, &tree);

        let a = Scheduler::live_preview(config).process_decoration(&view);
        let b = Scheduler::live_preview(config).process_decoration(&view);
        prop_assert_eq!(a, b);
    }

    /// A selection-only update never changes the merged collection
    #[test]
    fn selection_only_update_is_stable(doc in doc_strategy()) {
        let config = DecorationConfig { hide_marks: true };
        let tree = parse_document(&doc);
        let view = ViewSnapshot::full(&doc, &tree);

        let mut scheduler = Scheduler::live_preview(config);
        let full = scheduler.process_decoration(&view);
        let event = UpdateEvent::selection_only(tree.id());
        let update = scheduler.process_decoration_update(&view, &event);
        prop_assert_eq!(full, update);
    }

    /// Filtering an already-filtered collection with an unchanged selection
    /// is the identity
    #[test]
    fn filter_chain_is_idempotent(
        (doc, caret) in doc_strategy().prop_flat_map(|doc| {
            let len = doc.len();
            (Just(doc), 0..=len)
        })
    ) {
        let config = DecorationConfig { hide_marks: true };
        let tree = parse_document(&doc);
        let view = ViewSnapshot::new(&doc, &tree, vec![0..doc.len()], Selection::at(caret));

        let mut scheduler = Scheduler::live_preview(config);
        let merged = scheduler.process_decoration(&view);
        let once = scheduler.process_decoration_filter(&view, merged);
        let twice = scheduler.process_decoration_filter(&view, once.clone());
        prop_assert_eq!(once, twice);
    }

    /// Restricting the viewport only ever removes decorations, and every
    /// surviving decoration starts inside or before the window's clamp
    #[test]
    fn viewport_subset_of_full(
        (doc, a, b) in doc_strategy().prop_flat_map(|doc| {
            let len = doc.len().max(1);
            (Just(doc), 0..len, 0..len)
        })
    ) {
        let config = DecorationConfig::default();
        let tree = parse_document(&doc);
        let (start, end) = (a.min(b), a.max(b));

        let mut scheduler = Scheduler::live_preview(config);
        let windowed = scheduler.process_decoration(&ViewSnapshot::new(
            &doc,
            &tree,
            vec![start..end],
            Selection::default(),
        ));
        let full = Scheduler::live_preview(config)
            .process_decoration(&ViewSnapshot::full(&doc, &tree));

        prop_assert!(windowed.len() <= full.len());
        for d in windowed.iter() {
            prop_assert!(full.iter().any(|f| f == d));
        }
    }
}
