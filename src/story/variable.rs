//! Values of declared constants and variables.

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Deserialized value of a constant or variable declaration.
///
/// Deserialization is best effort: a right hand side which matches no
/// literal form is recorded as an opaque expression for the runtime to
/// evaluate, never an error.
pub enum Value {
    /// True or false.
    Bool(bool),
    /// Whole number.
    Int(i32),
    /// Decimal number.
    Float(f32),
    /// Text within double quotes.
    String(String),
    /// Flat recording of a list-typed value: for every list, which of its
    /// members are active in this value.
    List(HashMap<String, HashMap<String, bool>>),
    /// Unparsed expression payload.
    Expression(String),
}

impl Value {
    /// Construct a list value with the given members active.
    pub(crate) fn from_list_members(name: &str, active: &[String]) -> Self {
        let members = active
            .iter()
            .map(|member| (member.clone(), true))
            .collect::<HashMap<_, _>>();

        let mut lists = HashMap::new();
        lists.insert(name.to_string(), members);

        Value::List(lists)
    }
}

/// Parse a `Value` from the right hand side of a declaration.
pub fn parse_value(content: &str) -> Value {
    let content = content.trim();

    if content.to_lowercase() == "true" {
        Value::Bool(true)
    } else if content.to_lowercase() == "false" {
        Value::Bool(false)
    } else if content.starts_with('"') && content.ends_with('"') && content.len() >= 2 {
        Value::String(content.get(1..content.len() - 1).unwrap().to_string())
    } else if content.starts_with(|c: char| c.is_numeric() || c == '-' || c == '+') {
        parse_number(content)
    } else {
        Value::Expression(content.to_string())
    }
}

/// Parse a numeric value from a string, falling back to an expression.
fn parse_number(content: &str) -> Value {
    if content.contains('.') {
        content
            .parse::<f32>()
            .map(Value::Float)
            .unwrap_or_else(|_| Value::Expression(content.to_string()))
    } else {
        content
            .parse::<i32>()
            .map(Value::Int)
            .unwrap_or_else(|_| Value::Expression(content.to_string()))
    }
}
