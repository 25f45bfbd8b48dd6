//! Description fields: plain strings or the CMS rich-text block format.

use serde_json::Value;

use crate::event::{Block, Description};

pub fn parse_description(value: &Value) -> Description {
    match value {
        Value::String(text) if text.trim().is_empty() => Description::Empty,
        Value::String(text) => Description::Text(text.clone()),
        Value::Array(blocks) => {
            let blocks: Vec<Block> = blocks.iter().filter_map(parse_block).collect();
            if blocks.is_empty() {
                Description::Empty
            } else {
                Description::Blocks(blocks)
            }
        }
        _ => Description::Empty,
    }
}

// Only paragraphs and lists are rendered; other block types are dropped.
fn parse_block(block: &Value) -> Option<Block> {
    match block.get("type")?.as_str()? {
        "paragraph" => Some(Block::Paragraph(children_text(block))),
        "list" => {
            let items = block
                .get("children")?
                .as_array()?
                .iter()
                .filter(|child| child.get("type").and_then(Value::as_str) == Some("list-item"))
                .map(children_text)
                .collect();
            Some(Block::List(items))
        }
        _ => None,
    }
}

/// Concatenate the text leaves under a node.
fn children_text(node: &Value) -> String {
    let Some(children) = node.get("children").and_then(Value::as_array) else {
        return String::new();
    };

    children
        .iter()
        .map(|child| match child.get("text").and_then(Value::as_str) {
            Some(text) => text.to_string(),
            None => children_text(child),
        })
        .collect()
}
