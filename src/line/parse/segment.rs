//! Segmentation of line content into typed parts.
//!
//! A line of content is an ordered mix of plain text runs, jumps and
//! embraced (`{}`) constructs. The embraced constructs are classified in
//! order as conditionals, sequences and finally plain expressions: the
//! first alternative whose shape matches wins, so a colon makes a
//! conditional even if the content also holds sequence separators.

use crate::{
    consts::{
        CONDITION_SEPARATOR, CYCLE_MARKER, JUMP_MARKER, ONCE_ONLY_MARKER, SEQUENCE_SEPARATOR,
        SHUFFLE_MARKER,
    },
    error::{LineErrorKind, LineParsingError},
    line::{
        parse::utils::{get_separator_indices, split_line_at_separator, split_line_into_parts, LinePart},
        Address, SequenceMode,
    },
};

#[derive(Clone, Debug, PartialEq)]
/// Typed part of a segmented line.
pub enum Part {
    /// Plain text run, possibly ending with a jump.
    Text { text: String, jump: Option<Address> },
    /// Embraced expression, recorded as an opaque payload.
    Expression(String),
    /// Embraced conditional with unparsed branch texts.
    Conditional {
        condition: String,
        success: String,
        failure: Option<String>,
    },
    /// Embraced sequence with unparsed alternative texts.
    Sequence {
        mode: SequenceMode,
        shuffle: bool,
        alternatives: Vec<String>,
    },
}

impl Part {
    /// Whether the part contributes text to an open text item.
    pub fn is_textual(&self) -> bool {
        match self {
            Part::Text { .. } | Part::Expression(..) => true,
            _ => false,
        }
    }

    /// The jump carried by the part, if any.
    pub fn jump(&self) -> Option<&Address> {
        match self {
            Part::Text { jump, .. } => jump.as_ref(),
            _ => None,
        }
    }
}

/// Segment the content of a line into an ordered list of typed parts.
pub fn segment_line(content: &str) -> Result<Vec<Part>, LineParsingError> {
    let groups = split_line_into_parts(content)?;

    let mut parts = Vec::new();

    for (i, group) in groups.iter().enumerate() {
        match group {
            LinePart::Text(span) => {
                let followed_by_brace = match groups.get(i + 1) {
                    Some(LinePart::Embraced(..)) => true,
                    _ => false,
                };

                segment_text_span(span, followed_by_brace, &mut parts)?;
            }
            LinePart::Embraced(inner) => {
                parts.push(parse_embraced_part(inner)?);
            }
        }
    }

    Ok(parts)
}

/// Segment a brace-free span of text into text parts with their jumps.
///
/// Trailing whitespace of a text run is consumed, except when the run is
/// directly followed by an embraced part: then it is preserved, so that
/// expressions can abut text without unintended gaps.
fn segment_text_span(
    span: &str,
    followed_by_brace: bool,
    parts: &mut Vec<Part>,
) -> Result<(), LineParsingError> {
    let mut pieces = span.split(JUMP_MARKER);

    let mut current = pieces.next().unwrap();

    for tail in pieces {
        let (address, rest) = split_address(tail, span)?;

        parts.push(Part::Text {
            text: current.trim_end().to_string(),
            jump: Some(address),
        });

        current = rest;
    }

    if !current.is_empty() {
        let text = if followed_by_brace {
            current.to_string()
        } else {
            current.trim_end().to_string()
        };

        if !text.is_empty() {
            parts.push(Part::Text { text, jump: None });
        }
    }

    Ok(())
}

/// Split a jump address from the head of a string.
///
/// The address is a run of identifier characters and dots directly after
/// the jump marker. An empty run is the jump-to-nothing form. Returns the
/// address and the remaining text after it.
fn split_address<'a>(
    content: &'a str,
    line: &str,
) -> Result<(Address, &'a str), LineParsingError> {
    let trimmed = content.trim_start();

    let end = trimmed
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
        .unwrap_or(trimmed.len());

    let address = trimmed.get(..end).unwrap();
    let rest = trimmed.get(end..).unwrap().trim_start();

    Ok((parse_address(address, line)?, rest))
}

/// Parse and validate a dotted jump address.
///
/// An empty string parses into the empty jump-to-nothing address.
pub fn parse_address(content: &str, line: &str) -> Result<Address, LineParsingError> {
    if content.is_empty() {
        return Ok(Address::default());
    }

    let parts = content.split('.').collect::<Vec<_>>();

    let segments_are_valid = parts.iter().all(|part| {
        !part.is_empty() && part.chars().all(|c| c.is_alphanumeric() || c == '_')
    });

    if parts.len() > 3 || !segments_are_valid {
        Err(LineParsingError::from_kind(
            line,
            LineErrorKind::InvalidAddress {
                address: content.to_string(),
            },
        ))
    } else {
        Ok(Address {
            parts: parts.into_iter().map(|part| part.to_string()).collect(),
        })
    }
}

/// Classify and parse an embraced part of a line.
fn parse_embraced_part(content: &str) -> Result<Part, LineParsingError> {
    if content.trim().is_empty() {
        Err(LineParsingError::from_kind(
            content,
            LineErrorKind::EmptyExpression,
        ))
    } else if !get_separator_indices(content, CONDITION_SEPARATOR)?.is_empty() {
        parse_conditional_part(content)
    } else if begins_with_mode_sigil(content)
        || !get_separator_indices(content, SEQUENCE_SEPARATOR)?.is_empty()
    {
        parse_sequence_part(content)
    } else {
        Ok(Part::Expression(content.trim().to_string()))
    }
}

/// Parse an embraced conditional: condition text, success text and an
/// optional failure text.
fn parse_conditional_part(content: &str) -> Result<Part, LineParsingError> {
    let splits = split_line_at_separator(content, CONDITION_SEPARATOR, Some(1))?;

    let condition = splits[0].trim().to_string();
    let branches = split_line_at_separator(splits[1], SEQUENCE_SEPARATOR, Some(1))?;

    let success = branches[0].trim().to_string();
    let failure = branches.get(1).map(|text| text.trim().to_string());

    Ok(Part::Conditional {
        condition,
        success,
        failure,
    })
}

/// Parse an embraced sequence: an optional mode sigil followed by
/// alternatives separated by vertical lines.
fn parse_sequence_part(content: &str) -> Result<Part, LineParsingError> {
    let trimmed = content.trim_start();

    let (mode, shuffle, tail) = match trimmed.chars().next() {
        Some(ONCE_ONLY_MARKER) => (SequenceMode::Once, false, split_sigil(trimmed)),
        Some(CYCLE_MARKER) => (SequenceMode::Cycle, false, split_sigil(trimmed)),
        Some(SHUFFLE_MARKER) => (SequenceMode::Stop, true, split_sigil(trimmed)),
        _ => (SequenceMode::Stop, false, trimmed),
    };

    let alternatives = split_line_at_separator(tail, SEQUENCE_SEPARATOR, None)?
        .into_iter()
        .map(|text| text.trim().to_string())
        .collect::<Vec<_>>();

    Ok(Part::Sequence {
        mode,
        shuffle,
        alternatives,
    })
}

/// Whether embraced content begins with a sequence mode sigil.
fn begins_with_mode_sigil(content: &str) -> bool {
    match content.trim_start().chars().next() {
        Some(ONCE_ONLY_MARKER) | Some(CYCLE_MARKER) | Some(SHUFFLE_MARKER) => true,
        _ => false,
    }
}

/// Cut the single-character mode sigil from the head of a string.
fn split_sigil(content: &str) -> &str {
    let mut chars = content.chars();
    chars.next();
    chars.as_str()
}
