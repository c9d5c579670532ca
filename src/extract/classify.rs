//! Block classification: turns document nodes into [`Block`]s.
//!
//! The walk is lenient by construction. Only known element kinds produce blocks and
//! everything else is looked through, so malformed markup degrades to fewer blocks
//! rather than an error.

use log::debug;
use scraper::{ElementRef, Node};

use super::style::extract_style;
use crate::config::ExtractionOptions;
use crate::models::block::Block;

/// What a single element contributes to the block list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeClass {
    Heading(u8),
    Paragraph,
    ListItem,
    Table,
    /// Produces nothing itself but its children are visited.
    Container,
    /// Neither the element nor its subtree contribute content.
    Ignored,
}

pub(crate) fn classify_tag(tag: &str) -> NodeClass {
    match tag {
        "h1" => NodeClass::Heading(1),
        "h2" => NodeClass::Heading(2),
        "h3" => NodeClass::Heading(3),
        "h4" => NodeClass::Heading(4),
        "h5" => NodeClass::Heading(5),
        "h6" => NodeClass::Heading(6),
        "p" | "pre" | "blockquote" | "figcaption" | "dt" | "dd" => NodeClass::Paragraph,
        "li" => NodeClass::ListItem,
        "table" => NodeClass::Table,
        "head" | "script" | "style" | "template" | "noscript" => NodeClass::Ignored,
        _ => NodeClass::Container,
    }
}

fn is_list_container(tag: &str) -> bool {
    matches!(tag, "ul" | "ol")
}

/// Which descendants an element leaves out of its own text because they become
/// blocks of their own, visited right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextScope {
    Whole,
    /// List items: nested lists and tables.
    ListItem,
    /// Paragraph-like elements: nested lists, tables, headings, paragraphs and items.
    Flow,
    /// Table cells: nested tables.
    Cell,
}

impl TextScope {
    fn excludes(self, tag: &str) -> bool {
        match self {
            TextScope::Whole => false,
            TextScope::ListItem => is_list_container(tag) || tag == "table",
            TextScope::Flow => {
                is_list_container(tag)
                    || !matches!(classify_tag(tag), NodeClass::Container | NodeClass::Ignored)
            }
            TextScope::Cell => tag == "table",
        }
    }
}

/// Classifies a single element into a block, without visiting its descendants.
///
/// Returns `None` for unrecognized kinds and for recognized ones whose text (or, for
/// tables, every row) turned out empty.
pub fn classify_element(element: ElementRef<'_>, options: &ExtractionOptions) -> Option<Block> {
    let block = match classify_tag(element.value().name()) {
        NodeClass::Heading(level) => Block::Heading {
            level,
            text: block_text(element, TextScope::Whole)?,
            style: extract_style(*element, options),
        },
        NodeClass::Paragraph => Block::Paragraph {
            text: block_text(element, TextScope::Flow)?,
            style: extract_style(*element, options),
        },
        NodeClass::ListItem => Block::ListItem {
            level: list_level(element),
            text: block_text(element, TextScope::ListItem)?,
            style: extract_style(*element, options),
        },
        NodeClass::Table => {
            let rows = table_rows(element);
            if rows.is_empty() {
                debug!("[classify_element] Dropping table without non-empty rows");
                return None;
            }
            Block::Table {
                rows,
                style: extract_style(*element, options),
            }
        }
        NodeClass::Container | NodeClass::Ignored => return None,
    };
    Some(block)
}

/// Collects the blocks of `root` and its descendants in document order.
pub fn collect_blocks(root: ElementRef<'_>, options: &ExtractionOptions) -> Vec<Block> {
    let mut blocks = Vec::new();
    visit(root, options, &mut blocks);
    blocks
}

fn visit(element: ElementRef<'_>, options: &ExtractionOptions, blocks: &mut Vec<Block>) {
    match classify_tag(element.value().name()) {
        NodeClass::Ignored => {}
        NodeClass::Container => {
            for child in element.child_elements() {
                visit(child, options, blocks);
            }
        }
        NodeClass::Heading(_) => {
            blocks.extend(classify_element(element, options));
        }
        // Whatever the block's own text left out follows it.
        NodeClass::ListItem => {
            blocks.extend(classify_element(element, options));
            visit_nested_structures(element, TextScope::ListItem, options, blocks);
        }
        NodeClass::Paragraph => {
            blocks.extend(classify_element(element, options));
            visit_nested_structures(element, TextScope::Flow, options, blocks);
        }
        NodeClass::Table => {
            blocks.extend(classify_element(element, options));
            visit_nested_structures(element, TextScope::Cell, options, blocks);
        }
    }
}

fn visit_nested_structures(
    element: ElementRef<'_>,
    scope: TextScope,
    options: &ExtractionOptions,
    blocks: &mut Vec<Block>,
) {
    for child in element.child_elements() {
        let tag = child.value().name();
        if scope.excludes(tag) {
            visit(child, options, blocks);
        } else if classify_tag(tag) != NodeClass::Ignored {
            visit_nested_structures(child, scope, options, blocks);
        }
    }
}

/// Number of `ul`/`ol` ancestors, at least 1.
pub(crate) fn list_level(element: ElementRef<'_>) -> u32 {
    let depth = element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|ancestor| is_list_container(ancestor.value().name()))
        .count();
    u32::try_from(depth).unwrap_or(u32::MAX).max(1)
}

/// Trimmed text of an element with whitespace runs collapsed (preserved inside `pre`).
/// `None` when nothing but whitespace remains.
fn block_text(element: ElementRef<'_>, scope: TextScope) -> Option<String> {
    let mut raw = String::new();
    push_text(*element, scope, &mut raw);

    let text = if element.value().name() == "pre" {
        raw.trim().to_string()
    } else {
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    };
    (!text.is_empty()).then_some(text)
}

fn push_text(node: ego_tree::NodeRef<'_, Node>, scope: TextScope, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let tag = el.name();
                if scope.excludes(tag) || classify_tag(tag) == NodeClass::Ignored {
                    continue;
                }
                if tag == "br" {
                    out.push('\n');
                    continue;
                }
                push_text(child, scope, out);
            }
            _ => {}
        }
    }
}

/// Rows of the table itself, each a list of trimmed cell texts. Nested tables count
/// neither as rows nor as cell text. Rows without any non-empty cell are dropped.
fn table_rows(table: ElementRef<'_>) -> Vec<Vec<String>> {
    let mut row_elements = Vec::new();
    collect_row_elements(table, &mut row_elements);

    row_elements
        .into_iter()
        .filter_map(|row| {
            let cells: Vec<String> = row
                .child_elements()
                .filter(|cell| matches!(cell.value().name(), "th" | "td"))
                .map(|cell| block_text(cell, TextScope::Cell).unwrap_or_default())
                .collect();
            cells.iter().any(|cell| !cell.is_empty()).then_some(cells)
        })
        .collect()
}

fn collect_row_elements<'a>(element: ElementRef<'a>, rows: &mut Vec<ElementRef<'a>>) {
    for child in element.child_elements() {
        match child.value().name() {
            "tr" => rows.push(child),
            "table" => {}
            _ => collect_row_elements(child, rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn blocks_of(html: &str) -> Vec<Block> {
        let document = Html::parse_document(html);
        collect_blocks(document.root_element(), &ExtractionOptions::default())
    }

    #[test]
    fn test_headings_and_paragraphs_in_order() {
        let blocks = blocks_of("<h2>  Intro </h2><div><p>First\n   line</p></div><h6>End</h6>");
        let summary: Vec<(&str, Option<&str>)> =
            blocks.iter().map(|b| (b.kind_name(), b.text())).collect();
        assert_eq!(
            summary,
            vec![
                ("heading", Some("Intro")),
                ("paragraph", Some("First line")),
                ("heading", Some("End")),
            ]
        );
        assert!(matches!(blocks[2], Block::Heading { level: 6, .. }));
    }

    #[test]
    fn test_whitespace_only_nodes_are_dropped() {
        assert!(blocks_of("<h1>   </h1><p>\n\t</p><li> </li>").is_empty());
    }

    #[test]
    fn test_nested_list_levels() {
        let blocks = blocks_of(
            "<ul><li>One<ol><li>One.a<ul><li>Deep</li></ul></li></ol></li><li>Two</li></ul>",
        );
        let levels: Vec<(u32, &str)> = blocks
            .iter()
            .map(|block| match block {
                Block::ListItem { level, text, .. } => (*level, text.as_str()),
                other => panic!("unexpected block {:?}", other),
            })
            .collect();
        assert_eq!(
            levels,
            vec![(1, "One"), (2, "One.a"), (3, "Deep"), (1, "Two")]
        );
    }

    #[test]
    fn test_orphan_list_item_has_level_one() {
        let blocks = blocks_of("<div><li>loose</li></div>");
        assert!(matches!(blocks[0], Block::ListItem { level: 1, .. }));
    }

    #[test]
    fn test_table_rows_and_empty_row_drop() {
        let blocks = blocks_of(
            "<table><thead><tr><th>Name</th><th>Qty</th></tr></thead>
             <tbody><tr><td> </td><td></td></tr><tr><td>Apple</td><td> 3 </td></tr></tbody></table>",
        );
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Table { rows, .. } => assert_eq!(
                rows,
                &vec![
                    vec!["Name".to_string(), "Qty".to_string()],
                    vec!["Apple".to_string(), "3".to_string()],
                ]
            ),
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_table_without_content_produces_nothing() {
        assert!(blocks_of("<table><tr><td> </td></tr><tr></tr></table>").is_empty());
    }

    #[test]
    fn test_table_inside_generic_container_is_found() {
        let blocks = blocks_of("<section><div><span><table><tr><td>x</td></tr></table></span></div></section>");
        assert!(matches!(blocks.as_slice(), [Block::Table { .. }]));
    }

    #[test]
    fn test_nested_table_becomes_its_own_block() {
        let blocks = blocks_of(
            "<table><tr><td>outer<table><tr><td>inner</td></tr></table></td><td>next</td></tr></table>",
        );
        let tables: Vec<&Vec<Vec<String>>> = blocks
            .iter()
            .map(|block| match block {
                Block::Table { rows, .. } => rows,
                other => panic!("expected table, got {:?}", other),
            })
            .collect();
        assert_eq!(
            tables,
            vec![
                &vec![vec!["outer".to_string(), "next".to_string()]],
                &vec![vec!["inner".to_string()]],
            ]
        );
    }

    #[test]
    fn test_table_in_blockquote_is_found() {
        let blocks =
            blocks_of("<blockquote><p>Quote</p><table><tr><td>A</td><td>B</td></tr></table></blockquote>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind_name(), "paragraph");
        assert_eq!(blocks[0].text(), Some("Quote"));
        match &blocks[1] {
            Block::Table { rows, .. } => {
                assert_eq!(rows, &vec![vec!["A".to_string(), "B".to_string()]])
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_list_in_definition_follows_its_text() {
        let blocks = blocks_of("<dl><dt>Term</dt><dd>Def<ul><li>one</li><li>two</li></ul></dd></dl>");
        let summary: Vec<(&str, Option<&str>)> =
            blocks.iter().map(|b| (b.kind_name(), b.text())).collect();
        assert_eq!(
            summary,
            vec![
                ("paragraph", Some("Term")),
                ("paragraph", Some("Def")),
                ("list item", Some("one")),
                ("list item", Some("two")),
            ]
        );
        assert!(matches!(blocks[2], Block::ListItem { level: 1, .. }));
    }

    #[test]
    fn test_scripts_and_styles_are_ignored() {
        let blocks = blocks_of("<style>p{}</style><script>var p;</script><p>kept<script>x</script></p>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), Some("kept"));
    }

    #[test]
    fn test_pre_keeps_inner_whitespace() {
        let blocks = blocks_of("<pre>\n  fn main() {\n      run();\n  }\n</pre>");
        assert_eq!(blocks[0].text(), Some("fn main() {\n      run();\n  }"));
    }

    #[test]
    fn test_heading_carries_style() {
        let blocks = blocks_of(r#"<h1 style="color:#123456">Styled</h1>"#);
        let style = blocks[0].style();
        assert_eq!(style.color.as_deref(), Some("rgb(18, 52, 86)"));
        assert_eq!(style.font_weight, Some(700));
    }
}
