//! Conversion of segmented line parts into content items.
//!
//! A paragraph's parts are folded left to right while one text item is
//! kept open. Text and expression parts accumulate into the open item;
//! conditionals and sequences stand alone with recursively converted
//! branches; a jump closes the open item on the spot.
//!
//! Text items produced inside condition branches and sequence alternatives
//! are surrounded by glue markers, since such content continues the line
//! it is embedded in rather than starting a new one. At the document root
//! the converted sequence is instead guaranteed to begin and end with a
//! text item, so that the runtime always has a text anchor to concatenate
//! adjacent content into.

use crate::{
    consts::{EXPRESSION_MARKER, GLUE_MARKER},
    error::LineParsingError,
    line::{
        parse::segment::{segment_line, Part},
        Condition, Item, Sequence, Text,
    },
};

/// Convert the segmented parts of a paragraph into content items.
///
/// `is_root` is true only for the whole-paragraph conversion. Conversions
/// of condition branches and sequence alternatives set it to false, which
/// enables glue seeding and skips the boundary text insertion.
pub fn convert_parts_to_items(parts: &[Part], is_root: bool) -> Result<Vec<Item>, LineParsingError> {
    let mut items = Vec::new();
    let mut open: Option<Text> = None;

    for (i, part) in parts.iter().enumerate() {
        match part {
            Part::Conditional {
                condition,
                success,
                failure,
            } => {
                close_open_item(&mut open, &mut items);

                let success = convert_branch(success)?;
                let failure = failure.as_ref().map(|text| convert_branch(text)).transpose()?;

                items.push(Item::Condition(Condition {
                    condition: condition.clone(),
                    success,
                    failure,
                }));
            }
            Part::Sequence {
                mode,
                shuffle,
                alternatives,
            } => {
                close_open_item(&mut open, &mut items);

                let alternatives = alternatives
                    .iter()
                    .map(|text| convert_alternative(text))
                    .collect::<Result<Vec<_>, _>>()?;

                items.push(Item::Sequence(Sequence {
                    mode: *mode,
                    shuffle: *shuffle,
                    alternatives,
                }));
            }
            textual => {
                let item = open_text_item(&mut open, is_root, textual.jump().is_some());

                match textual {
                    Part::Text { text, .. } => item.text.push_str(text),
                    Part::Expression(expression) => {
                        item.text.push(EXPRESSION_MARKER);
                        item.text.push_str(expression);
                        item.text.push(EXPRESSION_MARKER);
                    }
                    _ => unreachable!(),
                }

                if let Some(address) = textual.jump() {
                    let mut item = open.take().unwrap();

                    if item.text == GLUE_MARKER {
                        item.text.clear();
                    }

                    item.jump = Some(address.clone());
                    items.push(Item::Text(item));
                } else if !next_part_is_textual(parts, i) {
                    let mut item = open.take().unwrap();

                    if !is_root {
                        item.text.push_str(GLUE_MARKER);
                    }

                    items.push(Item::Text(item));
                }
            }
        }
    }

    close_open_item(&mut open, &mut items);

    if is_root {
        if items.first().map(|item| !item.is_text()).unwrap_or(true) {
            items.insert(0, Item::Text(Text::default()));
        }

        if items.last().map(|item| !item.is_text()).unwrap_or(false) {
            items.push(Item::Text(Text::default()));
        }
    }

    Ok(items)
}

/// Segment and convert the text of a condition branch.
fn convert_branch(content: &str) -> Result<Vec<Item>, LineParsingError> {
    let parts = segment_line(content)?;
    convert_parts_to_items(&parts, false)
}

/// Segment and convert the text of a sequence alternative.
///
/// An empty alternative is permitted and represents an empty text item.
fn convert_alternative(content: &str) -> Result<Vec<Item>, LineParsingError> {
    let mut items = convert_branch(content)?;

    if items.is_empty() {
        items.push(Item::Text(Text::default()));
    }

    Ok(items)
}

/// Get the currently open text item, opening a fresh one if none is.
///
/// A fresh item at the document root, or one which will immediately jump
/// away, starts out empty. Any other fresh item belongs to a sub-branch
/// and is seeded with a glue marker: embedded content continues the
/// surrounding line rather than breaking it.
fn open_text_item<'a>(open: &'a mut Option<Text>, is_root: bool, has_jump: bool) -> &'a mut Text {
    open.get_or_insert_with(|| {
        let text = if is_root || has_jump {
            String::new()
        } else {
            GLUE_MARKER.to_string()
        };

        Text {
            text,
            ..Default::default()
        }
    })
}

/// Emit the open text item, if any.
fn close_open_item(open: &mut Option<Text>, items: &mut Vec<Item>) {
    if let Some(item) = open.take() {
        items.push(Item::Text(item));
    }
}

/// Whether the part after index `i` contributes text to an open item.
fn next_part_is_textual(parts: &[Part], i: usize) -> bool {
    parts
        .get(i + 1)
        .map(|part| part.is_textual())
        .unwrap_or(false)
}
