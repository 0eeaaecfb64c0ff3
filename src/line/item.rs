//! Structures representing parsed content in a document.
//!
//! Every line of narrative content is converted into a sequence of [`Item`]s.
//! Items form an owned tree: conditions and sequences contain fully parsed
//! item sequences in their branches, and choices contain the nested content
//! that follows them at deeper levels. No item is shared between two places
//! in the tree.

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Single piece of parsed content in a knot or stitch.
pub enum Item {
    /// Text to display, possibly with an attached jump.
    Text(Text),
    /// Content that is shown only if a condition holds.
    Condition(Condition),
    /// Content that alternates every time it is visited.
    Sequence(Sequence),
    /// Branch point which the user selects to follow.
    Choice(Choice),
    /// Assignment of a value expression to a variable.
    Assign(Assign),
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Plain text content.
///
/// The text may contain embedded expression markers, which the runtime
/// evaluates in place, and glue markers which suppress the implicit line
/// break that is otherwise added between consecutive text items.
pub struct Text {
    /// Text to display.
    pub text: String,
    /// Label which jumps may target.
    pub label: Option<String>,
    /// Tags associated with the line this text came from.
    pub tags: Vec<String>,
    /// Jump to perform after the text is displayed.
    pub jump: Option<Address>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Content that is displayed depending on a condition.
pub struct Condition {
    /// Condition to evaluate, recorded as an opaque expression.
    pub condition: String,
    /// Items displayed if the condition holds.
    pub success: Vec<Item>,
    /// Items displayed if the condition does not hold.
    pub failure: Option<Vec<Item>>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Set of alternative item sequences which the runtime selects from.
pub struct Sequence {
    /// How the runtime advances through the alternatives on repeat visits.
    pub mode: SequenceMode,
    /// Whether the alternatives are visited in random order.
    pub shuffle: bool,
    /// Alternatives to select from. Always contains at least one entry.
    pub alternatives: Vec<Vec<Item>>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Modes of advancing through a [`Sequence`]'s alternatives.
pub enum SequenceMode {
    /// Show each alternative once, then nothing.
    Once,
    /// Cycle through the alternatives forever.
    Cycle,
    /// Show each alternative once, then keep showing the last.
    Stop,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Branch point in the document.
///
/// The nested content that belongs to the choice is gathered in `node`:
/// every subsequent line at a strictly deeper level is added to it, and a
/// line at an equal or shallower level closes the choice.
pub struct Choice {
    /// Whether the choice remains selectable after having been selected once.
    pub sticky: bool,
    /// Text presented in the list of choices.
    pub label: String,
    /// Text displayed in the narration once the choice is selected.
    pub text: String,
    /// Jump to perform when the choice is selected.
    pub jump: Option<Address>,
    /// Content that follows once the choice is selected.
    pub node: Vec<Item>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Assignment of a value expression to a variable.
pub struct Assign {
    /// Whether the variable is temporary to the current knot or stitch.
    pub temporary: bool,
    /// Name of the variable to assign to.
    pub variable: String,
    /// Right hand side of the assignment, recorded as an opaque expression.
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Target of a jump: a dotted path of up to three identifiers.
///
/// An empty path is a jump with no destination, which ends the current
/// thread of content. Addresses are left unresolved by the parser.
pub struct Address {
    /// Knot, stitch and label identifiers, outermost first.
    pub parts: Vec<String>,
}

impl Address {
    /// Whether this is a jump with no destination.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.parts.join("."))
    }
}

impl Item {
    /// Whether the item is a `Text` item.
    pub fn is_text(&self) -> bool {
        match self {
            Item::Text(..) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
impl Text {
    /// Construct a plain text item with no label, tags or jump.
    pub fn from_string(text: &str) -> Self {
        Text {
            text: text.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl Address {
    /// Construct an address from a dotted path.
    pub fn from_path(path: &str) -> Self {
        Address {
            parts: path.split('.').map(|part| part.to_string()).collect(),
        }
    }
}
