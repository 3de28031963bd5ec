//! Markdown parser adapter
//!
//! The engine consumes the parser as a black box producing tagged nodes; this
//! module is that boundary. It maps `pulldown-cmark` offset events into a
//! `SyntaxTree` snapshot, scanning the source for the delimiter marks (`#`
//! runs, emphasis delimiters, backticks, list markers, link destinations) the
//! event stream does not surface as ranges of their own. All scans are
//! bounds-checked; a construct that fails to scan simply contributes no mark
//! node.

use crate::syntax::{NodeTag, SyntaxNode, SyntaxTree};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd};
use std::ops::Range;

/// Parse a full document into a tree snapshot valid through `text.len()`
pub fn parse_document(text: &str) -> SyntaxTree {
    let mut nodes = Vec::new();
    // Ordered-ness of the innermost open list, for item markers
    let mut list_stack: Vec<bool> = Vec::new();

    for (event, range) in Parser::new_ext(text, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let level = heading_level(level);
                nodes.push(SyntaxNode::new(NodeTag::Heading { level }, range.start, range.end));
                if let Some(mark) = heading_mark(text, &range) {
                    nodes.push(SyntaxNode::new(
                        NodeTag::HeadingMark { level },
                        mark.start,
                        mark.end,
                    ));
                }
            }
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => {
                nodes.push(SyntaxNode::new(NodeTag::FencedCode, range.start, range.end));
            }
            Event::Start(Tag::BlockQuote(_)) => {
                nodes.push(SyntaxNode::new(NodeTag::Blockquote, range.start, range.end));
            }
            Event::Start(Tag::Emphasis) => emphasis_nodes(&mut nodes, text, &range, 1),
            Event::Start(Tag::Strong) => emphasis_nodes(&mut nodes, text, &range, 2),
            Event::Start(Tag::Link { link_type, .. }) => {
                nodes.push(SyntaxNode::new(NodeTag::Link, range.start, range.end));
                if link_type == LinkType::Inline {
                    if let Some(url) = url_span(text, &range) {
                        nodes.push(SyntaxNode::new(NodeTag::Url, url.start, url.end));
                    }
                }
            }
            Event::Start(Tag::List(start)) => list_stack.push(start.is_some()),
            Event::End(TagEnd::List(_)) => {
                list_stack.pop();
            }
            Event::Start(Tag::Item) => {
                nodes.push(SyntaxNode::new(NodeTag::ListItem, range.start, range.end));
                let ordered = list_stack.last().copied().unwrap_or(false);
                if let Some(mark) = list_mark(text, &range) {
                    nodes.push(SyntaxNode::new(
                        NodeTag::ListMark { ordered },
                        mark.start,
                        mark.end,
                    ));
                }
            }
            Event::Start(Tag::Paragraph) => {
                nodes.push(SyntaxNode::new(NodeTag::Paragraph, range.start, range.end));
            }
            Event::Code(_) => inline_code_nodes(&mut nodes, text, &range),
            Event::Rule => {
                nodes.push(SyntaxNode::new(NodeTag::HorizontalRule, range.start, range.end));
            }
            _ => {}
        }
    }

    SyntaxTree::new(nodes, text.len())
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Leading `#` run of an ATX heading, including one trailing space.
/// Returns None for setext headings, which carry no mark.
fn heading_mark(text: &str, range: &Range<usize>) -> Option<Range<usize>> {
    let slice = text.get(range.clone())?;
    let trimmed = slice.trim_start_matches(' ');
    let indent = slice.len() - trimmed.len();
    let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let start = range.start + indent;
    let mut end = start + hashes;
    if text.as_bytes().get(end) == Some(&b' ') {
        end += 1;
    }
    Some(start..end)
}

/// Emphasis container plus its delimiter runs (`delim` is 1 for emphasis, 2 for strong)
fn emphasis_nodes(nodes: &mut Vec<SyntaxNode>, text: &str, range: &Range<usize>, delim: usize) {
    nodes.push(SyntaxNode::new(NodeTag::Emphasis, range.start, range.end));

    let Some(slice) = text.get(range.clone()) else {
        return;
    };
    if slice.len() < 2 * delim {
        return;
    }
    let is_delim = |b: &u8| matches!(b, b'*' | b'_');
    let open_ok = slice.as_bytes()[..delim].iter().all(is_delim);
    let close_ok = slice.as_bytes()[slice.len() - delim..].iter().all(is_delim);
    if open_ok {
        nodes.push(SyntaxNode::new(
            NodeTag::EmphasisMark,
            range.start,
            range.start + delim,
        ));
    }
    if close_ok {
        nodes.push(SyntaxNode::new(
            NodeTag::EmphasisMark,
            range.end - delim,
            range.end,
        ));
    }
}

/// Inline code span plus its backtick delimiter runs
fn inline_code_nodes(nodes: &mut Vec<SyntaxNode>, text: &str, range: &Range<usize>) {
    nodes.push(SyntaxNode::new(NodeTag::InlineCode, range.start, range.end));

    let Some(slice) = text.get(range.clone()) else {
        return;
    };
    let open = slice.bytes().take_while(|&b| b == b'`').count();
    let close = slice.bytes().rev().take_while(|&b| b == b'`').count();
    if open > 0 && close > 0 && open + close < slice.len() {
        nodes.push(SyntaxNode::new(NodeTag::CodeMark, range.start, range.start + open));
        nodes.push(SyntaxNode::new(NodeTag::CodeMark, range.end - close, range.end));
    }
}

/// Destination span of an inline link: between `](` and the closing `)`,
/// excluding any quoted title
fn url_span(text: &str, range: &Range<usize>) -> Option<Range<usize>> {
    let slice = text.get(range.clone())?;
    if !slice.ends_with(')') {
        return None;
    }
    let open = slice.rfind("](")?;
    let start = range.start + open + 2;
    let mut end = range.end - 1;
    if let Some(ws) = text.get(start..end)?.find(char::is_whitespace) {
        end = start + ws;
    }
    (start < end).then_some(start..end)
}

/// Source marker of a list item: `-`/`*`/`+` or a digit run plus `.`/`)`
fn list_mark(text: &str, range: &Range<usize>) -> Option<Range<usize>> {
    let slice = text.get(range.clone())?;
    let trimmed = slice.trim_start_matches([' ', '\t']);
    let indent = slice.len() - trimmed.len();
    let start = range.start + indent;
    match trimmed.bytes().next()? {
        b'-' | b'*' | b'+' => Some(start..start + 1),
        b'0'..=b'9' => {
            let digits = trimmed.bytes().take_while(|b| b.is_ascii_digit()).count();
            match trimmed.as_bytes().get(digits) {
                Some(b'.' | b')') => Some(start..start + digits + 1),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(tree: &SyntaxTree, pred: impl Fn(&SyntaxNode) -> bool) -> Vec<SyntaxNode> {
        tree.nodes().iter().copied().filter(|n| pred(n)).collect()
    }

    #[test]
    fn test_heading_and_mark() {
        let tree = parse_document("## Title\n");

        let headings = find(&tree, |n| matches!(n.tag, NodeTag::Heading { level: 2 }));
        assert_eq!(headings.len(), 1);

        let marks = find(&tree, |n| matches!(n.tag, NodeTag::HeadingMark { level: 2 }));
        assert_eq!(marks.len(), 1);
        // The mark covers "## " including the separating space
        assert_eq!((marks[0].from, marks[0].to), (0, 3));
    }

    #[test]
    fn test_setext_heading_has_no_mark() {
        let tree = parse_document("Title\n=====\n");
        assert_eq!(find(&tree, |n| matches!(n.tag, NodeTag::Heading { .. })).len(), 1);
        assert!(find(&tree, |n| matches!(n.tag, NodeTag::HeadingMark { .. })).is_empty());
    }

    #[test]
    fn test_fenced_code_block() {
        let text = "```rust\nfn x() {}\n```\n";
        let tree = parse_document(text);
        let blocks = find(&tree, |n| n.tag == NodeTag::FencedCode);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].from, 0);

        // Indented code is not a fenced block
        let tree = parse_document("    indented code\n");
        assert!(find(&tree, |n| n.tag == NodeTag::FencedCode).is_empty());
    }

    #[test]
    fn test_emphasis_marks() {
        let text = "a *b* and **c**\n";
        let tree = parse_document(text);

        let marks = find(&tree, |n| n.tag == NodeTag::EmphasisMark);
        assert_eq!(marks.len(), 4);
        assert_eq!((marks[0].from, marks[0].to), (2, 3)); // opening *
        assert_eq!((marks[1].from, marks[1].to), (4, 5)); // closing *
        assert_eq!((marks[2].from, marks[2].to), (10, 12)); // opening **
        assert_eq!((marks[3].from, marks[3].to), (13, 15)); // closing **
    }

    #[test]
    fn test_inline_code_marks() {
        let text = "use `let` here\n";
        let tree = parse_document(text);

        let spans = find(&tree, |n| n.tag == NodeTag::InlineCode);
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].from, spans[0].to), (4, 9));

        let marks = find(&tree, |n| n.tag == NodeTag::CodeMark);
        assert_eq!(marks.len(), 2);
        assert_eq!((marks[0].from, marks[0].to), (4, 5));
        assert_eq!((marks[1].from, marks[1].to), (8, 9));
    }

    #[test]
    fn test_link_url_span() {
        let text = "see [x](http://y) end\n";
        let tree = parse_document(text);

        let links = find(&tree, |n| n.tag == NodeTag::Link);
        assert_eq!(links.len(), 1);

        let urls = find(&tree, |n| n.tag == NodeTag::Url);
        assert_eq!(urls.len(), 1);
        assert_eq!(&text[urls[0].from..urls[0].to], "http://y");
    }

    #[test]
    fn test_link_url_span_excludes_title() {
        let text = "[x](http://y \"title\")\n";
        let tree = parse_document(text);
        let urls = find(&tree, |n| n.tag == NodeTag::Url);
        assert_eq!(urls.len(), 1);
        assert_eq!(&text[urls[0].from..urls[0].to], "http://y");
    }

    #[test]
    fn test_list_marks() {
        let text = "- one\n- two\n\n1. first\n2. second\n";
        let tree = parse_document(text);

        let bullets = find(&tree, |n| n.tag == NodeTag::ListMark { ordered: false });
        assert_eq!(bullets.len(), 2);
        assert_eq!(&text[bullets[0].from..bullets[0].to], "-");

        let numbers = find(&tree, |n| n.tag == NodeTag::ListMark { ordered: true });
        assert_eq!(numbers.len(), 2);
        assert_eq!(&text[numbers[0].from..numbers[0].to], "1.");
        assert_eq!(&text[numbers[1].from..numbers[1].to], "2.");
    }

    #[test]
    fn test_horizontal_rule() {
        let tree = parse_document("a\n\n---\n\nb\n");
        assert_eq!(find(&tree, |n| n.tag == NodeTag::HorizontalRule).len(), 1);
    }

    #[test]
    fn test_blockquote() {
        let text = "> quoted\n> more\n";
        let tree = parse_document(text);
        let quotes = find(&tree, |n| n.tag == NodeTag::Blockquote);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].from, 0);
    }

    #[test]
    fn test_watermark_covers_document() {
        let text = "# a\n\ntext\n";
        let tree = parse_document(text);
        assert_eq!(tree.valid_to(), text.len());
    }
}
