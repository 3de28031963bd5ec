//! Types supplied by (and actions returned to) the host text view
//!
//! The host view is an external collaborator: it owns the buffer, the
//! viewport, and event dispatch. Each pass receives a read-only snapshot of
//! the pieces the engine needs; incremental passes additionally receive the
//! update event that triggered them.

use crate::decoration::Widget;
use crate::syntax::{SyntaxTree, TreeId};
use crate::text::LineIndex;
use std::ops::Range;

/// Primary selection; `head` is the caret byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub head: usize,
}

impl Selection {
    pub fn at(head: usize) -> Self {
        Self { head }
    }
}

/// Read-only snapshot of everything a decoration pass needs from the host
#[derive(Debug)]
pub struct ViewSnapshot<'a> {
    pub text: &'a str,
    pub lines: LineIndex,
    /// Windows of the document currently rendered; zero or more
    pub visible_ranges: Vec<Range<usize>>,
    pub selection: Selection,
    pub tree: &'a SyntaxTree,
}

impl<'a> ViewSnapshot<'a> {
    pub fn new(
        text: &'a str,
        tree: &'a SyntaxTree,
        visible_ranges: Vec<Range<usize>>,
        selection: Selection,
    ) -> Self {
        Self {
            text,
            lines: LineIndex::new(text),
            visible_ranges,
            selection,
            tree,
        }
    }

    /// Snapshot with the whole document visible and the caret at the start
    pub fn full(text: &'a str, tree: &'a SyntaxTree) -> Self {
        Self::new(text, tree, vec![0..text.len()], Selection::default())
    }

    /// Line containing the primary selection
    pub fn selection_line(&self) -> usize {
        self.lines.line_of(self.selection.head)
    }
}

/// Host update event driving an incremental pass
#[derive(Debug, Clone, Copy)]
pub struct UpdateEvent {
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub selection_set: bool,
    /// Tree identity before the update
    pub prev_tree: TreeId,
    /// Tree identity after the update
    pub tree: TreeId,
}

impl UpdateEvent {
    /// Whether the shared syntax tree object identity changed
    pub fn tree_changed(&self) -> bool {
        self.prev_tree != self.tree
    }

    /// The uniform recompute condition every shipped annotator uses
    pub fn needs_recompute(&self) -> bool {
        self.doc_changed || self.viewport_changed || self.tree_changed()
    }

    /// An update that only moved the selection on an unchanged document
    pub fn selection_only(tree: TreeId) -> Self {
        Self {
            doc_changed: false,
            viewport_changed: false,
            selection_set: true,
            prev_tree: tree,
            tree,
        }
    }
}

/// A UI event forwarded by the host dispatch (e.g. a pointer click)
#[derive(Debug, Clone)]
pub struct UiEvent {
    /// Event name the host dispatch keys on ("click")
    pub name: String,
    /// Document offset under the pointer
    pub offset: usize,
    /// Widget under the pointer, if any, as recorded in the rendered set
    pub widget: Option<Widget>,
}

/// Action a handler asks the host to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    OpenLink { url: String },
}
