//! Parser for a line-oriented, knot-and-stitch branching narrative markup
//! language.
//!
//! A document is divided into knots (chapters) and stitches (sections)
//! with `=== knot ===` and `= stitch` headers. Within them, lines of text
//! mix with `*`/`+` choices, `-` gather points, `->` jumps, `{}` inline
//! conditions, sequences and expressions, `#` tags and `LIST`, `CONST`,
//! `VAR` and `INCLUDE` declarations.
//!
//! [`read_document_from_string`] turns such a document into a plain,
//! nested [`Document`] model in a single pass. The model carries no
//! behavior: jump addresses are left unresolved, expressions and
//! conditions are recorded as opaque strings and include paths are not
//! opened. Walking the tree, evaluating expressions and selecting
//! sequence alternatives is the business of a separate runtime.
//!
//! # Example
//! ```
//! use skein::{read_document_from_string, Item};
//!
//! let content = "\
//! VAR visited = false
//!
//! === crossroads ===
//! A signpost leans into the wind.
//!
//! *   Take the low road -> lowlands
//! *   Take the high road
//!     The climb is steep.
//!
//! === lowlands ===
//! Mud everywhere.
//! ";
//!
//! let document = read_document_from_string(content).unwrap();
//!
//! assert_eq!(document.items("crossroads", "_").unwrap().len(), 3);
//!
//! match &document.items("crossroads", "_").unwrap()[1] {
//!     Item::Choice(choice) => assert_eq!(&choice.label, "Take the low road"),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! # Features
//! *   `serde_support`: derives `Serialize` and `Deserialize` for the
//!     whole document model.

mod consts;
mod error;
mod line;
mod story;
mod utils;

pub use consts::{ENGINE_VERSION, EXPRESSION_MARKER, GLUE_MARKER, ROOT_NAME, TREE_VERSION};
pub use error::{LineErrorKind, ParseError};
pub use line::{Address, Assign, Choice, Condition, Item, Sequence, SequenceMode, Text};
pub use story::{read_document_from_string, Document, KnotSet, Value};
pub use utils::MetaData;
