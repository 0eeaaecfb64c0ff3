//! Utilities and derives used elsewhere in the library.

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Information about the origin of an item.
///
/// To be used to present errors from parsing, allowing access to where
/// the error originated from.
pub struct MetaData {
    /// Which line in the original document the item originated from.
    pub line_index: u32,
}
