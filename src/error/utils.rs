//! Utilities for printing errors.

use std::fmt;

use crate::utils::MetaData;

/// Write meta data information for a line or piece of content in a document.
pub(crate) fn write_line_information<W: fmt::Write>(
    buffer: &mut W,
    meta_data: &MetaData,
) -> fmt::Result {
    write!(buffer, "(line {}) ", meta_data.line_index + 1)
}
