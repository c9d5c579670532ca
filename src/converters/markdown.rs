use crate::models::{block::Block, slide::Slide};
use std::fmt::Write; // Import Write trait for formatting

// --- Block Formatting ---

/// Escapes the pipe character so cell text cannot break a Markdown table row.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Formats table rows as a Markdown pipe table; the first row becomes the header.
fn format_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut table = String::new();

    for (index, row) in rows.iter().enumerate() {
        let mut cells: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
        cells.resize(columns, String::new());
        let _ = writeln!(table, "| {} |", cells.join(" | "));
        if index == 0 {
            let _ = writeln!(table, "|{}", " --- |".repeat(columns));
        }
    }
    table.trim_end().to_string()
}

/// Formats a single block as one Markdown chunk.
fn format_block(block: &Block) -> String {
    match block {
        Block::Heading { level, text, .. } => {
            // Slide headers already use levels 1 and 2.
            let hashes = "#".repeat(usize::from(*level).saturating_add(2).min(6));
            format!("{} {}", hashes, text)
        }
        Block::Paragraph { text, .. } => text.clone(),
        Block::ListItem { level, text, .. } => {
            let indent = "  ".repeat(level.saturating_sub(1) as usize);
            format!("{}- {}", indent, text)
        }
        Block::Table { rows, .. } => format_table(rows),
    }
}

/// Joins the blocks of a slide; consecutive list items stay on adjacent lines.
fn format_slide_body(slide: &Slide) -> String {
    let mut body = String::new();
    let mut previous_was_item = false;

    for block in &slide.blocks {
        let is_item = matches!(block, Block::ListItem { .. });
        if !body.is_empty() {
            body.push_str(if is_item && previous_was_item { "\n" } else { "\n\n" });
        }
        body.push_str(&format_block(block));
        previous_was_item = is_item;
    }
    body
}

// --- Public API Function ---

/// Formats logical slides as a Markdown outline.
///
/// Each slide gets a `## Slide N (kind)` header followed by its blocks in order;
/// slides are separated by horizontal rules.
pub fn slides_to_markdown(slides: &[Slide]) -> String {
    let mut full_text = String::new();
    let _ = writeln!(full_text, "# Presentation\n");

    for (index, slide) in slides.iter().enumerate() {
        if index > 0 {
            let _ = writeln!(full_text, "\n---\n");
        }
        let _ = writeln!(full_text, "## Slide {} ({})\n", index + 1, slide.kind.as_str());
        let _ = writeln!(full_text, "{}", format_slide_body(slide));
    }

    full_text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{slide::SlideKind, style::StyleSubset};

    #[test]
    fn test_outline_of_two_slides() {
        let slides = vec![
            Slide {
                kind: SlideKind::Title,
                blocks: vec![Block::Heading {
                    level: 1,
                    text: "Quarterly review".to_string(),
                    style: StyleSubset::default(),
                }],
                background: None,
            },
            Slide {
                kind: SlideKind::Content,
                blocks: vec![
                    Block::ListItem {
                        level: 1,
                        text: "Revenue".to_string(),
                        style: StyleSubset::default(),
                    },
                    Block::ListItem {
                        level: 2,
                        text: "EMEA".to_string(),
                        style: StyleSubset::default(),
                    },
                    Block::Table {
                        rows: vec![
                            vec!["Region".to_string(), "Q1".to_string()],
                            vec!["A|B".to_string()],
                        ],
                        style: StyleSubset::default(),
                    },
                ],
                background: None,
            },
        ];

        let markdown = slides_to_markdown(&slides);
        let expected = "# Presentation\n\n\
## Slide 1 (title)\n\n\
### Quarterly review\n\
\n---\n\n\
## Slide 2 (content)\n\n\
- Revenue\n  - EMEA\n\n\
| Region | Q1 |\n| --- | --- |\n| A\\|B |  |\n";
        assert_eq!(markdown, expected);
    }
}
