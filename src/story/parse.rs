//! Parsing of whole documents.
//!
//! The input is consumed line by line from top to bottom. Every line is
//! dispatched through the ordered-choice line grammar and the parsed
//! result mutates the parse context: headers move the knot and stitch
//! cursors, choices open containers on the nesting stack, declarations
//! fill the flat dictionaries and paragraphs append their converted items
//! at the line's level. The first line the grammar cannot advance over
//! aborts the parse; no partial document is returned.

use crate::{
    consts::{BLOCK_COMMENT_CLOSE, BLOCK_COMMENT_OPEN, LINE_COMMENT_MARKER, TODO_COMMENT_MARKER},
    error::{LineErrorKind, ParseError},
    line::{parse_line_kind, ParsedLineKind},
    story::{Document, ParseContext, Value},
    utils::MetaData,
};

/// Parse a document from a string.
///
/// # Examples
/// ```
/// # use skein::read_document_from_string;
/// let content = "\
/// === garden ===
/// A well tended garden.
///
/// *   Smell the roses.
///     They smell like roses.
/// *   Leave -> _
/// ";
///
/// let document = read_document_from_string(content).unwrap();
/// assert!(document.items("garden", "_").is_some());
/// ```
pub fn read_document_from_string(content: &str) -> Result<Document, ParseError> {
    let content = strip_block_comments(content)?;

    let mut context = ParseContext::new();

    for (line_index, full_line) in content.lines().enumerate() {
        let meta_data = MetaData {
            line_index: line_index as u32,
        };

        let line = remove_line_comment(full_line).trim();

        if line.is_empty() || line.starts_with(TODO_COMMENT_MARKER) {
            continue;
        }

        let kind =
            parse_line_kind(line).map_err(|err| ParseError::from_line_error(err, meta_data))?;

        add_parsed_line_to_context(kind, &mut context);
    }

    Ok(context.into_document())
}

/// Apply the effect of one parsed line to the parse context.
fn add_parsed_line_to_context(kind: ParsedLineKind, context: &mut ParseContext) {
    match kind {
        ParsedLineKind::Include { path } => {
            context.document_mut().includes.push(path);
        }
        ParsedLineKind::List {
            name,
            members,
            active,
        } => {
            let value = Value::from_list_members(&name, &active);

            let document = context.document_mut();
            document.lists.insert(name.clone(), members);
            document.variables.insert(name, value);
        }
        ParsedLineKind::Constant { name, value } => {
            context.document_mut().constants.insert(name, value);
        }
        ParsedLineKind::Variable { name, value } => {
            context.document_mut().variables.insert(name, value);
        }
        ParsedLineKind::Choice { level, item } => {
            context.add_choice(level, item);
        }
        ParsedLineKind::Knot { name } => {
            context.add_knot(&name);
        }
        ParsedLineKind::Stitch { name } => {
            context.add_stitch(&name);
        }
        ParsedLineKind::Assign { level, item } => {
            context.append_at(level, item);
        }
        ParsedLineKind::Paragraph { level, items } => {
            let mut items = items.into_iter();

            if let Some(first) = items.next() {
                context.append_at(level, first);

                for item in items {
                    context.append_at(0, item);
                }
            }
        }
    }
}

/// Cut a line comment from the end of a line.
fn remove_line_comment(line: &str) -> &str {
    match line.find(LINE_COMMENT_MARKER) {
        Some(i) => line.get(..i).unwrap(),
        None => line,
    }
}

/// Remove all block comments from the input.
///
/// Line breaks inside a removed comment are kept, so that line indices in
/// error messages keep pointing at the original input. An unterminated
/// block comment is a fatal error.
fn strip_block_comments(content: &str) -> Result<String, ParseError> {
    let mut buffer = String::with_capacity(content.len());
    let mut remaining = content;

    while let Some(open) = remaining.find(BLOCK_COMMENT_OPEN) {
        buffer.push_str(remaining.get(..open).unwrap());

        let tail = remaining.get(open + BLOCK_COMMENT_OPEN.len()..).unwrap();

        match tail.find(BLOCK_COMMENT_CLOSE) {
            Some(close) => {
                let interior = tail.get(..close).unwrap();
                buffer.extend(interior.chars().filter(|&c| c == '\n'));

                remaining = tail.get(close + BLOCK_COMMENT_CLOSE.len()..).unwrap();
            }
            None => {
                let line_index = buffer.matches('\n').count();
                let line = content.lines().nth(line_index).unwrap_or("").to_string();

                return Err(ParseError {
                    kind: LineErrorKind::UnterminatedComment,
                    line,
                    meta_data: MetaData {
                        line_index: line_index as u32,
                    },
                });
            }
        }
    }

    buffer.push_str(remaining);

    Ok(buffer)
}
