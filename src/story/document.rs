//! The document model produced by a parse.

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use std::collections::HashMap;

use crate::{
    consts::{ENGINE_VERSION, ROOT_NAME, TREE_VERSION},
    line::Item,
    story::Value,
};

/// Convenience type for the content of a document: knot name to stitch
/// name to the ordered items of that stitch.
pub type KnotSet = HashMap<String, HashMap<String, Vec<Item>>>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Parsed document, ready to hand off to a runtime.
///
/// The model is plain data with no behavior: jump addresses are not
/// resolved, expressions are not evaluated and include paths are not
/// opened. Content which precedes the first knot or stitch header is
/// found under the implicit `"_"` knot and stitch names, which always
/// exist.
pub struct Document {
    /// Version of the engine the document is built for.
    pub engine_version: u32,
    /// Version of the content tree format.
    pub tree_version: u32,
    /// All narrative content, organized into knots and stitches.
    pub root: KnotSet,
    /// Paths of included files, in source order.
    pub includes: Vec<String>,
    /// Declared constants.
    pub constants: HashMap<String, Value>,
    /// Declared variables. A list-typed variable's value is itself a map.
    pub variables: HashMap<String, Value>,
    /// Declared lists with their member names in source order.
    pub lists: HashMap<String, Vec<String>>,
}

impl Document {
    /// Create an empty document with the implicit root knot and stitch.
    pub(crate) fn new() -> Self {
        let mut root = KnotSet::new();
        root.entry(ROOT_NAME.to_string())
            .or_insert_with(HashMap::new)
            .insert(ROOT_NAME.to_string(), Vec::new());

        Document {
            engine_version: ENGINE_VERSION,
            tree_version: TREE_VERSION,
            root,
            includes: Vec::new(),
            constants: HashMap::new(),
            variables: HashMap::new(),
            lists: HashMap::new(),
        }
    }

    /// Get the items of a knot and stitch, if present.
    pub fn items(&self, knot: &str, stitch: &str) -> Option<&[Item]> {
        self.root
            .get(knot)
            .and_then(|stitches| stitches.get(stitch))
            .map(|items| items.as_slice())
    }
}
