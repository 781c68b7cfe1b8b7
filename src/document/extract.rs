//! Block extraction from statute HTML
//!
//! Walks the content root of an HTML page in document order and flattens each
//! text-bearing element into a `Block`: its tag kind, the style classes found
//! on it and its descendants, its normalized text, and whether it carries a
//! link or emphasis.

use std::borrow::Cow;

use tl::{HTMLTag, NodeHandle, Parser, ParserOptions};

use super::error::DocumentError;
use super::models::*;

/// Blocks of one page plus the page title
#[derive(Debug, Clone, Default)]
pub struct ExtractedHtml {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

/// Extract blocks from the element with id `content_root_id`
pub fn extract_blocks(html: &str, content_root_id: &str) -> Result<ExtractedHtml, DocumentError> {
    let dom = tl::parse(html, ParserOptions::default())
        .map_err(|e| DocumentError::Markup(format!("{e:?}")))?;
    let parser = dom.parser();

    let title = dom
        .query_selector("title")
        .and_then(|mut found| found.next())
        .and_then(|handle| handle.get(parser))
        .map(|node| normalize_text(&decode(&node.inner_text(parser))))
        .filter(|title| !title.is_empty());

    let root = dom
        .nodes()
        .iter()
        .filter_map(|node| node.as_tag())
        .find(|tag| {
            tag.attributes()
                .id()
                .is_some_and(|id| id.as_utf8_str() == content_root_id)
        })
        .ok_or_else(|| DocumentError::NoContentRoot {
            id: content_root_id.to_string(),
        })?;

    let mut blocks = Vec::new();
    walk_children(parser, root, &mut blocks);

    Ok(ExtractedHtml { title, blocks })
}

fn walk(parser: &Parser, handle: NodeHandle, blocks: &mut Vec<Block>) {
    let Some(node) = handle.get(parser) else {
        return;
    };

    let Some(tag) = node.as_tag() else {
        // Loose text between block elements
        if let Some(raw) = node.as_raw() {
            let text = normalize_text(&decode(&raw.as_utf8_str()));
            if !text.is_empty() {
                blocks.push(Block::new(BlockTag::Other, text));
            }
        }
        return;
    };

    let name = tag_name(tag);
    match name.as_str() {
        "p" => blocks.push(block_from_tag(parser, tag, BlockTag::Paragraph)),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            blocks.push(block_from_tag(parser, tag, BlockTag::Heading))
        }
        "ul" | "ol" => {
            for child in tag.children().top().iter() {
                let Some(item) = child.get(parser).and_then(|n| n.as_tag()) else {
                    continue;
                };
                if tag_name(item) == "li" {
                    blocks.push(block_from_tag(parser, item, BlockTag::ListItem).with_hint(&name));
                } else {
                    walk(parser, *child, blocks);
                }
            }
        }
        "li" => blocks.push(block_from_tag(parser, tag, BlockTag::ListItem)),
        "table" => blocks.push(table_block(parser, tag)),
        "span" | "a" | "em" | "i" | "b" | "strong" | "font" => {
            blocks.push(block_from_tag(parser, tag, BlockTag::InlineSpan))
        }
        "script" | "style" | "br" | "hr" | "img" => {}
        _ => walk_children(parser, tag, blocks),
    }
}

const INLINE_TAGS: [&str; 11] = [
    "span", "a", "em", "i", "b", "strong", "font", "br", "sup", "sub", "u",
];

/// Walk a container, keeping each run of loose text and inline tags together as one block
fn walk_children(parser: &Parser, parent: &HTMLTag, blocks: &mut Vec<Block>) {
    let mut run = Vec::new();
    for child in parent.children().top().iter() {
        if is_inline(parser, *child) {
            run.push(*child);
            continue;
        }
        flush_inline_run(parser, &mut run, blocks);
        walk(parser, *child, blocks);
    }
    flush_inline_run(parser, &mut run, blocks);
}

fn is_inline(parser: &Parser, handle: NodeHandle) -> bool {
    let Some(node) = handle.get(parser) else {
        return false;
    };
    match node.as_tag() {
        Some(tag) => INLINE_TAGS.contains(&tag_name(tag).as_str()),
        None => node.as_raw().is_some(),
    }
}

fn flush_inline_run(parser: &Parser, run: &mut Vec<NodeHandle>, blocks: &mut Vec<Block>) {
    if run.is_empty() {
        return;
    }

    let mut facts = InlineFacts::default();
    let mut tags = 0usize;
    let mut loose_text = false;
    for handle in run.drain(..) {
        let Some(node) = handle.get(parser) else {
            continue;
        };
        if let Some(tag) = node.as_tag() {
            tags += 1;
            inspect(parser, tag, &mut facts);
        } else if let Some(raw) = node.as_raw() {
            let utf8 = raw.as_utf8_str();
            let text = decode(&utf8);
            loose_text |= !text.trim().is_empty();
            facts.text.push_str(&text);
        }
    }

    if normalize_text(&facts.text).is_empty() {
        return;
    }
    // A lone inline tag keeps its own kind; anything mixed is plain container text
    let kind = if loose_text || tags > 1 {
        BlockTag::Other
    } else {
        BlockTag::InlineSpan
    };
    blocks.push(facts.into_block(kind));
}

fn tag_name(tag: &HTMLTag) -> String {
    tag.name().as_utf8_str().to_ascii_lowercase()
}

#[derive(Debug, Default)]
struct InlineFacts {
    text: String,
    hints: Vec<String>,
    link_target: Option<String>,
    has_link: bool,
    has_emphasis: bool,
}

impl InlineFacts {
    fn into_block(self, kind: BlockTag) -> Block {
        Block {
            tag: kind,
            style_hints: self.hints,
            text: normalize_text(&self.text),
            has_link: self.has_link,
            link_target: self.link_target,
            has_emphasis: self.has_emphasis,
            cells: Vec::new(),
        }
    }
}

fn block_from_tag(parser: &Parser, tag: &HTMLTag, kind: BlockTag) -> Block {
    let mut facts = InlineFacts::default();
    inspect(parser, tag, &mut facts);
    facts.into_block(kind)
}

/// Gather text, classes, links and emphasis from a tag and everything under it
fn inspect(parser: &Parser, tag: &HTMLTag, facts: &mut InlineFacts) {
    let name = tag_name(tag);

    if let Some(classes) = tag.attributes().class() {
        for class in classes.as_utf8_str().split_whitespace() {
            if !facts.hints.iter().any(|hint| hint == class) {
                facts.hints.push(class.to_string());
            }
        }
    }

    match name.as_str() {
        "a" => {
            if let Some(Some(href)) = tag.attributes().get("href") {
                facts.has_link = true;
                if facts.link_target.is_none() {
                    facts.link_target = Some(decode(&href.as_utf8_str()).into_owned());
                }
            }
        }
        "em" | "i" => facts.has_emphasis = true,
        "br" => facts.text.push(' '),
        "script" | "style" => return,
        _ => {}
    }

    for child in tag.children().top().iter() {
        let Some(node) = child.get(parser) else {
            continue;
        };
        if let Some(inner) = node.as_tag() {
            inspect(parser, inner, facts);
        } else if let Some(raw) = node.as_raw() {
            facts.text.push_str(&decode(&raw.as_utf8_str()));
        }
    }
}

fn table_block(parser: &Parser, table: &HTMLTag) -> Block {
    let mut rows = Vec::new();
    collect_rows(parser, table, &mut rows);

    let text = rows
        .iter()
        .flatten()
        .filter(|cell| !cell.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

    Block::new(BlockTag::Table, text).with_cells(rows)
}

fn collect_rows(parser: &Parser, tag: &HTMLTag, rows: &mut TableRows) {
    for child in tag.children().top().iter() {
        let Some(inner) = child.get(parser).and_then(|n| n.as_tag()) else {
            continue;
        };
        match tag_name(inner).as_str() {
            "tr" => {
                let cells: Vec<String> = inner
                    .children()
                    .top()
                    .iter()
                    .filter_map(|cell| cell.get(parser).and_then(|n| n.as_tag()))
                    .filter(|cell| matches!(tag_name(cell).as_str(), "td" | "th"))
                    .map(|cell| block_from_tag(parser, cell, BlockTag::Other).text)
                    .collect();
                if !cells.is_empty() {
                    rows.push(cells);
                }
            }
            // Nested tables belong to their own cell text
            "table" => {}
            _ => collect_rows(parser, inner, rows),
        }
    }
}

fn decode(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}

/// Collapse every run of whitespace (including non-breaking spaces) to one space
pub(crate) fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!(
            "<html><head><title>Про дорожній рух - Закон № 3353-XII від 30.06.1993</title></head>\
             <body><div id=\"article\">{body}</div></body></html>"
        )
    }

    #[test]
    fn test_missing_root_is_reported() {
        let err = extract_blocks("<html><body><p>x</p></body></html>", "article").unwrap_err();
        assert!(matches!(err, DocumentError::NoContentRoot { ref id } if id == "article"));
    }

    #[test]
    fn test_title_and_paragraphs() {
        let extracted = extract_blocks(
            &page("<p class=\"rvps2\">Перший&nbsp;абзац</p><p>Другий\n   абзац</p>"),
            "article",
        )
        .unwrap();

        assert_eq!(
            extracted.title.as_deref(),
            Some("Про дорожній рух - Закон № 3353-XII від 30.06.1993")
        );
        assert_eq!(extracted.blocks.len(), 2);
        assert_eq!(extracted.blocks[0].text, "Перший абзац");
        assert_eq!(extracted.blocks[0].style_hints, vec!["rvps2"]);
        assert_eq!(extracted.blocks[1].text, "Другий абзац");
    }

    #[test]
    fn test_descendant_hints_links_and_emphasis() {
        let extracted = extract_blocks(
            &page(
                "<p class=\"rvps7\"><span class=\"rvts15\">Розділ I</span><br>\
                 <span class=\"rvts15\">ЗАГАЛЬНІ ПОЛОЖЕННЯ</span></p>\
                 <p><em>{Із змінами згідно із <a href=\"/laws/show/1-20\">Законом</a>}</em></p>",
            ),
            "article",
        )
        .unwrap();

        let heading = &extracted.blocks[0];
        assert_eq!(heading.text, "Розділ I ЗАГАЛЬНІ ПОЛОЖЕННЯ");
        assert!(heading.has_hint("rvps7"));
        assert!(heading.has_hint("rvts15"));
        assert!(!heading.has_link);

        let amendment = &extracted.blocks[1];
        assert!(amendment.has_emphasis);
        assert!(amendment.has_link);
        assert_eq!(amendment.link_target.as_deref(), Some("/laws/show/1-20"));
        assert_eq!(amendment.text, "{Із змінами згідно із Законом}");
    }

    #[test]
    fn test_lists_tables_and_containers() {
        let extracted = extract_blocks(
            &page(
                "<div><h2>Заголовок</h2><ol><li>перше</li><li>друге</li></ol></div>\
                 <table><tbody><tr><th>Назва</th><th>Значення</th></tr>\
                 <tr><td>A</td><td>1</td></tr><tr></tr></tbody></table>",
            ),
            "article",
        )
        .unwrap();

        let tags: Vec<BlockTag> = extracted.blocks.iter().map(|b| b.tag).collect();
        assert_eq!(
            tags,
            vec![
                BlockTag::Heading,
                BlockTag::ListItem,
                BlockTag::ListItem,
                BlockTag::Table
            ]
        );
        assert!(extracted.blocks[1].has_hint("ol"));

        let table = &extracted.blocks[3];
        assert_eq!(
            table.cells,
            vec![
                vec!["Назва".to_string(), "Значення".to_string()],
                vec!["A".to_string(), "1".to_string()],
            ]
        );
        assert_eq!(table.text, "Назва Значення A 1");
    }

    #[test]
    fn test_mixed_inline_content_stays_one_block() {
        let extracted = extract_blocks(
            &page(
                "<div>Текст <b>жирний</b> далі<p>Абзац</p><span class=\"rvts9\">окремо</span></div>\
                 <div>див. <a href=\"/laws/show/2\">Закон</a></div>",
            ),
            "article",
        )
        .unwrap();

        let blocks: Vec<(BlockTag, &str)> = extracted
            .blocks
            .iter()
            .map(|b| (b.tag, b.text.as_str()))
            .collect();
        assert_eq!(
            blocks,
            vec![
                (BlockTag::Other, "Текст жирний далі"),
                (BlockTag::Paragraph, "Абзац"),
                (BlockTag::InlineSpan, "окремо"),
                (BlockTag::Other, "див. Закон"),
            ]
        );
        assert!(extracted.blocks[2].has_hint("rvts9"));
        assert_eq!(extracted.blocks[3].link_target.as_deref(), Some("/laws/show/2"));
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  a \u{a0} b\n\tc "), "a b c");
        assert_eq!(normalize_text("   "), "");
    }
}
