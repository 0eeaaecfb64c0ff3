//! Parse all kinds of lines as marked up `ParsedLineKind` objects.
//!
//! The alternatives are tried in a fixed order and the first whose shape
//! matches wins. Several rules are prefixes of others (a stitch marker is
//! a prefix of a knot marker, a gather marker is a prefix of a jump
//! marker), so the order is part of the grammar and must not change.
//! A keyword alternative which does not complete its shape falls through:
//! the paragraph alternative at the end consumes any remaining line.

use crate::{
    consts::{
        ASSIGNMENT_MARKER, CONST_KEYWORD, GATHER_MARKER, INCLUDE_KEYWORD, JUMP_MARKER,
        KNOT_MARKER, LIST_KEYWORD, STITCH_MARKER, TAG_MARKER, TEMPORARY_KEYWORD,
        VARIABLE_KEYWORD,
    },
    error::{LineErrorKind, LineParsingError},
    line::{
        parse::{
            choice::parse_choice, paragraph::convert_parts_to_items, segment::segment_line,
            utils::split_line_at_separator,
        },
        Assign, Item,
    },
    story::{parse_value, Value},
};

#[derive(Clone, Debug, PartialEq)]
/// Representation of a parsed line of a document.
///
/// To construct the nested tree structure of branching choices we need
/// information about which level every choice and gather line is at. This
/// structure marks the parsed data of such lines with their level.
pub enum ParsedLineKind {
    /// File inclusion directive. The path is recorded, never opened.
    Include { path: String },
    /// List declaration with its members and initially active subset.
    List {
        name: String,
        members: Vec<String>,
        active: Vec<String>,
    },
    /// Constant declaration.
    Constant { name: String, value: Value },
    /// Variable declaration.
    Variable { name: String, value: Value },
    /// Choice line, where `item` is the choice or its condition wrapper.
    Choice { level: u32, item: Item },
    /// Knot header: resets the current knot and stitch.
    Knot { name: String },
    /// Stitch header: resets the current stitch.
    Stitch { name: String },
    /// Variable assignment statement.
    Assign { level: u32, item: Item },
    /// Regular line of content, converted into its items.
    Paragraph { level: u32, items: Vec<Item> },
}

/// Parse a line into a `ParsedLineKind` object.
pub fn parse_line_kind(content: &str) -> Result<ParsedLineKind, LineParsingError> {
    if let Some(kind) = parse_include(content) {
        Ok(kind)
    } else if let Some(kind) = parse_list_declaration(content) {
        Ok(kind)
    } else if let Some(kind) = parse_constant_declaration(content) {
        Ok(kind)
    } else if let Some(kind) = parse_variable_declaration(content) {
        Ok(kind)
    } else if let Some(kind) = parse_choice(content)? {
        Ok(kind)
    } else if let Some(kind) = parse_division_header(content) {
        Ok(kind)
    } else if let Some(kind) = parse_assignment(content)? {
        Ok(kind)
    } else {
        parse_paragraph(content)
    }
}

/// Parse an `INCLUDE` directive from a line if the line represents one.
fn parse_include(content: &str) -> Option<ParsedLineKind> {
    let tail = content
        .strip_prefix(INCLUDE_KEYWORD)?
        .strip_prefix(char::is_whitespace)?;

    let path = tail.trim();

    if path.is_empty() {
        None
    } else {
        Some(ParsedLineKind::Include {
            path: path.to_string(),
        })
    }
}

/// Parse a `LIST` declaration from a line if the line represents one.
fn parse_list_declaration(content: &str) -> Option<ParsedLineKind> {
    let (name, value_text) = parse_keyword_declaration(content, LIST_KEYWORD)?;
    let (members, active) = parse_list_members(value_text);

    Some(ParsedLineKind::List {
        name,
        members,
        active,
    })
}

/// Parse a `CONST` declaration from a line if the line represents one.
fn parse_constant_declaration(content: &str) -> Option<ParsedLineKind> {
    let (name, value_text) = parse_keyword_declaration(content, CONST_KEYWORD)?;

    Some(ParsedLineKind::Constant {
        name,
        value: parse_value(value_text),
    })
}

/// Parse a `VAR` declaration from a line if the line represents one.
fn parse_variable_declaration(content: &str) -> Option<ParsedLineKind> {
    let (name, value_text) = parse_keyword_declaration(content, VARIABLE_KEYWORD)?;

    Some(ParsedLineKind::Variable {
        name,
        value: parse_value(value_text),
    })
}

/// Match the shape `KEYWORD identifier = text` and return the identifier
/// along with the text after the equals sign.
fn parse_keyword_declaration<'a>(content: &'a str, keyword: &str) -> Option<(String, &'a str)> {
    let tail = content
        .strip_prefix(keyword)?
        .strip_prefix(char::is_whitespace)?
        .trim_start();

    let (name, rest) = split_identifier(tail);
    let rest = rest.trim_start();

    if name.is_empty() || !rest.starts_with('=') {
        return None;
    }

    Some((name.to_string(), rest.get(1..).unwrap()))
}

/// Parse the member names of a list declaration.
///
/// Members are runs of word characters, underscores and dots, separated by
/// any other characters. Members inside parentheses are marked as
/// initially active.
fn parse_list_members(content: &str) -> (Vec<String>, Vec<String>) {
    let mut members = Vec::new();
    let mut active = Vec::new();

    let mut current = String::new();
    let mut depth = 0;

    for c in content.chars().chain(Some('\n')) {
        if c.is_alphanumeric() || c == '_' || c == '.' {
            current.push(c);
        } else {
            if !current.is_empty() {
                members.push(current.clone());

                if depth > 0 {
                    active.push(current.clone());
                }

                current.clear();
            }

            if c == '(' {
                depth += 1;
            } else if c == ')' && depth > 0 {
                depth -= 1;
            }
        }
    }

    (members, active)
}

/// Parse a knot or stitch header from a line if the line represents one.
///
/// Knots are marked with two or more equals signs, stitches with a single
/// one. Both allow a trailing run of equals signs after the name. A marked
/// line whose name is not a plain identifier is not a header and falls
/// through to the paragraph alternative.
fn parse_division_header(content: &str) -> Option<ParsedLineKind> {
    if !content.starts_with(STITCH_MARKER) {
        return None;
    }

    let after_markers = content.trim_start_matches('=');
    let (name, rest) = split_identifier(after_markers.trim_start());

    if name.is_empty() || !rest.chars().all(|c| c == '=' || c.is_whitespace()) {
        return None;
    }

    let name = name.to_string();

    if content.starts_with(KNOT_MARKER) {
        Some(ParsedLineKind::Knot { name })
    } else {
        Some(ParsedLineKind::Stitch { name })
    }
}

/// Parse an assignment statement from a line if the line represents one.
///
/// Compound shorthand (`x++`, `x--`, `x += e`, `x -= e`) is rewritten into
/// the explicit `x = x + e` form before the statement is split at its
/// first equals sign.
fn parse_assignment(content: &str) -> Result<Option<ParsedLineKind>, LineParsingError> {
    let (level, rest) = parse_gather_markers_and_text(content);

    let tail = match rest.strip_prefix(ASSIGNMENT_MARKER) {
        Some(tail) => tail.trim_start(),
        None => return Ok(None),
    };

    let (temporary, expression) = match tail.strip_prefix(TEMPORARY_KEYWORD) {
        Some(after) if after.starts_with(char::is_whitespace) => (true, after.trim_start()),
        _ => (false, tail),
    };

    let normalized = normalize_assignment_shorthand(expression.trim_end());

    let i = normalized.find('=').ok_or_else(|| {
        LineParsingError::from_kind(content, LineErrorKind::InvalidAssignment)
    })?;

    let variable = normalized.get(..i).unwrap().trim().to_string();
    let value = normalized.get(i + 1..).unwrap().trim().to_string();

    if variable.is_empty() {
        return Err(LineParsingError::from_kind(
            content,
            LineErrorKind::InvalidAssignment,
        ));
    }

    Ok(Some(ParsedLineKind::Assign {
        level,
        item: Item::Assign(Assign {
            temporary,
            variable,
            value,
        }),
    }))
}

/// Rewrite compound-assignment shorthand into an explicit `name = expr` form.
fn normalize_assignment_shorthand(expression: &str) -> String {
    if let Some(name) = expression
        .strip_suffix("++")
        .map(str::trim)
        .filter(|name| is_identifier(name))
    {
        return format!("{} = {} + 1", name, name);
    }

    if let Some(name) = expression
        .strip_suffix("--")
        .map(str::trim)
        .filter(|name| is_identifier(name))
    {
        return format!("{} = {} - 1", name, name);
    }

    for &(shorthand, operator) in &[("+=", '+'), ("-=", '-')] {
        if let Some(i) = expression.find(shorthand) {
            let name = expression.get(..i).unwrap().trim();
            let tail = expression.get(i + shorthand.len()..).unwrap().trim();

            if is_identifier(name) {
                return format!("{} = {} {} {}", name, name, operator, tail);
            }
        }
    }

    expression.to_string()
}

/// Parse a regular line of content, with its optional gather markers,
/// label and tags, into converted items.
fn parse_paragraph(content: &str) -> Result<ParsedLineKind, LineParsingError> {
    let (level, text) = parse_gather_markers_and_text(content);

    let (label, text) = split_off_label(text);
    let (text, tags) = split_off_tags(text)?;

    let parts = segment_line(text.trim_start())?;
    let mut items = convert_parts_to_items(&parts, true)?;

    if let Some(Item::Text(first)) = items.first_mut() {
        first.label = label;
        first.tags = tags;
    }

    Ok(ParsedLineKind::Paragraph { level, items })
}

/// Count leading gather markers and return the level with the remaining text.
///
/// A marker which begins a jump sigil ends the run and belongs to the text.
pub fn parse_gather_markers_and_text(content: &str) -> (u32, &str) {
    let mut level = 0;

    for (i, c) in content.char_indices() {
        if c == GATHER_MARKER && !content.get(i..).unwrap().starts_with(JUMP_MARKER) {
            level += 1;
        } else if !c.is_whitespace() {
            return (level, content.get(i..).unwrap());
        }
    }

    (level, "")
}

/// Split a `(label)` group off the head of a line.
///
/// Only a parenthesized plain identifier is a label: anything else is
/// regular text and is left in place.
fn split_off_label(content: &str) -> (Option<String>, &str) {
    let trimmed = content.trim_start();

    if trimmed.starts_with('(') {
        if let Some(end) = trimmed.find(')') {
            let name = trimmed.get(1..end).unwrap().trim();

            if is_identifier(name) {
                return (Some(name.to_string()), trimmed.get(end + 1..).unwrap());
            }
        }
    }

    (None, content)
}

/// Split tags off the end of a line.
///
/// Tags are started by tag markers outside of braces and collected in order.
fn split_off_tags(content: &str) -> Result<(&str, Vec<String>), LineParsingError> {
    let mut splits = split_line_at_separator(content, TAG_MARKER, None)?;

    let text = splits.remove(0);
    let tags = splits
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .collect();

    Ok((text, tags))
}

/// Split the leading identifier run from a string and return both parts.
fn split_identifier(content: &str) -> (&str, &str) {
    let end = content
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(content.len());

    content.split_at(end)
}

/// Whether a string is a plain identifier: word characters and underscores.
pub fn is_identifier(content: &str) -> bool {
    !content.is_empty() && content.chars().all(|c| c.is_alphanumeric() || c == '_')
}
