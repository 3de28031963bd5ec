//! Static visual style registrations
//!
//! Each annotator may attach a fixed rule set once at assembly; nothing here
//! is recomputed. The host applies the collected rules at view construction.

/// One CSS-like rule: selector plus property declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeRule {
    pub selector: &'static str,
    pub declarations: &'static [(&'static str, &'static str)],
}

/// A named, static set of rules contributed by one annotator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSet {
    pub name: &'static str,
    pub rules: &'static [ThemeRule],
}
