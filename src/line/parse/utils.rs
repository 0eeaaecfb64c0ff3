//! Utilities for parsing of lines.

use crate::error::{LineErrorKind, LineParsingError};

#[derive(Clone, Debug, PartialEq)]
/// Text and embraced parts of a line.
///
/// Lines can be split into pure text and text that is enclosed by '{}' braces,
/// which indicate that the internal content should be processed.
pub enum LinePart<'a> {
    /// Pure text part of the line.
    Text(&'a str),
    /// Text part which was enclosed in '{}' braces.
    Embraced(&'a str),
}

/// Map every byte in a string to how many curly braces are nested for it.
///
/// The opening and closing braces themselves map to the level inside,
/// respectively outside, of their pair.
pub fn get_brace_level_of_line(content: &str) -> Result<Vec<u8>, LineParsingError> {
    content
        .bytes()
        .scan(0u8, |brace_level, b| {
            if b == b'{' {
                *brace_level += 1;
            } else if b == b'}' {
                if *brace_level > 0 {
                    *brace_level -= 1;
                } else {
                    return Some(Err(LineParsingError::from_kind(
                        content,
                        LineErrorKind::UnmatchedBraces,
                    )));
                }
            }

            Some(Ok(*brace_level))
        })
        .collect::<Result<Vec<_>, _>>()
        .and_then(|brace_levels| {
            if brace_levels.last().map(|&v| v == 0).unwrap_or(true) {
                Ok(brace_levels)
            } else {
                Err(LineParsingError::from_kind(
                    content,
                    LineErrorKind::UnmatchedBraces,
                ))
            }
        })
}

/// Return the byte indices at which a separator occurs outside of braces.
pub fn get_separator_indices(
    content: &str,
    separator: &str,
) -> Result<Vec<usize>, LineParsingError> {
    let brace_levels = get_brace_level_of_line(content)?;

    Ok(content
        .match_indices(separator)
        .map(|(i, _)| i)
        .filter(|&i| brace_levels[i] == 0)
        .collect())
}

/// Return a line split at a separator, ignoring separators inside curly braces.
///
/// If `max_splits` is given, at most that many splits are performed from
/// the left of the string.
///
/// # Notes
/// *   Works for strings with multibyte characters, since the braces are
///     searched for by their byte indices, not char index positions.
/// *   Will not work if the separator itself includes curly '{}' braces.
pub fn split_line_at_separator<'a>(
    content: &'a str,
    separator: &str,
    max_splits: Option<usize>,
) -> Result<Vec<&'a str>, LineParsingError> {
    let mut indices = get_separator_indices(content, separator)?;

    if let Some(max_splits) = max_splits {
        indices.truncate(max_splits);
    }

    let separator_size = separator.as_bytes().len();
    let mut parts = Vec::with_capacity(indices.len() + 1);
    let mut start = 0;

    for i in indices {
        parts.push(content.get(start..i).unwrap());
        start = i + separator_size;
    }

    parts.push(content.get(start..).unwrap());

    Ok(parts)
}

/// Split a line into parts of pure text and text enclosed in curly braces.
///
/// The braces around an enclosed part are not included in its content.
/// Nested braces within an enclosed part are kept intact.
pub fn split_line_into_parts(content: &str) -> Result<Vec<LinePart>, LineParsingError> {
    let brace_levels = get_brace_level_of_line(content)?;

    let mut parts = Vec::new();
    let mut start = 0;
    let mut embrace_start = None;

    for (i, &level) in brace_levels.iter().enumerate() {
        let byte = content.as_bytes()[i];

        if byte == b'{' && level == 1 {
            if i > start {
                parts.push(LinePart::Text(content.get(start..i).unwrap()));
            }

            embrace_start = Some(i + 1);
        } else if byte == b'}' && level == 0 {
            let inner_start = embrace_start.take().unwrap();
            parts.push(LinePart::Embraced(content.get(inner_start..i).unwrap()));

            start = i + 1;
        }
    }

    if start < content.as_bytes().len() {
        parts.push(LinePart::Text(content.get(start..).unwrap()));
    }

    Ok(parts)
}
