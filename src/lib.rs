//! Live-preview decoration engine for a markdown note editor
//!
//! # Design
//! - **One shared traversal**: each recompute walks the visible syntax nodes once
//!   and fans every node out to all registered annotators
//! - **Incremental updates**: annotators untouched by an update reuse their cached
//!   decorations verbatim
//! - **Selection-driven filtering**: a post-merge pass reveals the raw markdown on
//!   the line (or inside the span) the caret is on
//! - **Debounced outline**: full-document heading recomputes coalesce behind a
//!   trailing 500 ms deadline
//!
//! The host text view supplies the document, the parsed syntax tree, visible
//! ranges, selection, and update events; the engine returns a merged, ordered
//! decoration collection the host renders. Everything is synchronous and
//! single-threaded on the host's event loop; failures degrade to fewer or no
//! decorations, never a broken editor.

pub mod annotator;
pub mod config;
pub mod decoration;
pub mod metrics;
pub mod outline;
pub mod parse;
pub mod scheduler;
pub mod syntax;
pub mod text;
pub mod theme;
pub mod view;

pub use config::DecorationConfig;
pub use decoration::{
    Decoration, DecorationKind, DecorationSet, FilterRule, LineClass, Side, Widget,
};
pub use outline::{OutlineEntry, OutlineTracker, OUTLINE_DEBOUNCE};
pub use parse::parse_document;
pub use scheduler::{Scheduler, SchedulerBuilder};
pub use syntax::{NodeTag, SyntaxNode, SyntaxTree, TreeId};
pub use view::{HostAction, Selection, UiEvent, UpdateEvent, ViewSnapshot};
