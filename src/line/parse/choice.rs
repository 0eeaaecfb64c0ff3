//! Parse choice lines into marked up `ParsedLineKind::Choice` objects.

use crate::{
    consts::{CHOICE_MARKER, JUMP_MARKER, STICKY_CHOICE_MARKER},
    error::{LineErrorKind, LineParsingError},
    line::{
        parse::{
            segment::parse_address,
            utils::{get_brace_level_of_line, split_line_at_separator},
        },
        Address, Choice, Condition, Item, ParsedLineKind,
    },
};

/// Parse a `ParsedLineKind::Choice` from a line if the line represents a choice.
pub fn parse_choice(content: &str) -> Result<Option<ParsedLineKind>, LineParsingError> {
    parse_choice_markers_and_text(content)?
        .map(|(level, is_sticky, line)| {
            parse_choice_data(line, is_sticky).map(|item| ParsedLineKind::Choice { level, item })
        })
        .transpose()
}

/// Parse the data of a choice from the line content after its markers.
///
/// The built `Choice` is wrapped in a `Condition` item if the line carried
/// a condition in braces before its text.
fn parse_choice_data(content: &str, is_sticky: bool) -> Result<Item, LineParsingError> {
    let (condition, body) = split_off_condition(content)?;

    let (body, jump) = split_off_end_jump(body)?;
    let body = body.trim();

    let choice = if body.is_empty() {
        Choice {
            sticky: is_sticky,
            jump,
            ..Default::default()
        }
    } else {
        let (label, text) = parse_choice_line_variants(body)?;

        Choice {
            sticky: is_sticky,
            label: label.trim().to_string(),
            text: text.trim().to_string(),
            jump,
            node: Vec::new(),
        }
    };

    match condition {
        Some(condition) => Ok(Item::Condition(Condition {
            condition,
            success: vec![Item::Choice(choice)],
            failure: None,
        })),
        None => Ok(Item::Choice(choice)),
    }
}

/// Split choice markers from a line and determine whether it is sticky.
///
/// If markers are present, ensure that the line does not mix sticky and
/// non-sticky markers. Return the number of markers along with whether the
/// choice was sticky and the remaining line.
pub fn parse_choice_markers_and_text(
    content: &str,
) -> Result<Option<(u32, bool, &str)>, LineParsingError> {
    let head_until = content
        .find(|c: char| {
            !(c.is_whitespace() || c == CHOICE_MARKER || c == STICKY_CHOICE_MARKER)
        })
        .unwrap_or(content.len());

    let head = content.get(..head_until).unwrap();

    let num_regular = head.matches(CHOICE_MARKER).count() as u32;
    let num_sticky = head.matches(STICKY_CHOICE_MARKER).count() as u32;

    match (num_regular, num_sticky) {
        (0, 0) => Ok(None),
        (level, 0) => Ok(Some((level, false, content.get(head_until..).unwrap()))),
        (0, level) => Ok(Some((level, true, content.get(head_until..).unwrap()))),
        _ => Err(LineParsingError::from_kind(
            content,
            LineErrorKind::StickyAndNonSticky,
        )),
    }
}

/// Split a condition in braces off the head of a choice line.
fn split_off_condition(content: &str) -> Result<(Option<String>, &str), LineParsingError> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with('{') {
        return Ok((None, content));
    }

    let brace_levels = get_brace_level_of_line(trimmed)
        .map_err(|_| LineParsingError::from_kind(content, LineErrorKind::UnmatchedBraces))?;

    let closing = brace_levels
        .iter()
        .position(|&level| level == 0)
        .unwrap();

    let condition = trimmed.get(1..closing).unwrap().trim().to_string();
    let rest = trimmed.get(closing + 1..).unwrap();

    Ok((Some(condition), rest))
}

/// Split a trailing jump off a choice line.
///
/// The jump must be the last content on the line: an address followed by
/// more text is an error.
fn split_off_end_jump(content: &str) -> Result<(&str, Option<Address>), LineParsingError> {
    let splits = split_line_at_separator(content, JUMP_MARKER, Some(1))?;

    match splits.len() {
        1 => Ok((content, None)),
        _ => {
            let target = splits[1].trim();

            if target.contains(char::is_whitespace) {
                let tail = target
                    .splitn(2, char::is_whitespace)
                    .nth(1)
                    .unwrap()
                    .trim_start()
                    .to_string();

                Err(LineParsingError::from_kind(
                    content,
                    LineErrorKind::ExpectedEndOfLine { tail },
                ))
            } else {
                Ok((splits[0], Some(parse_address(target, content)?)))
            }
        }
    }
}

/// Return label and continuation text strings from a choice body.
///
/// These are demarcated by `[]` brackets. Content before the bracket is
/// both label and continuation, content inside the bracket belongs only to
/// the label and content after it only to the continuation.
fn parse_choice_line_variants(line: &str) -> Result<(String, String), LineParsingError> {
    match (line.find('['), line.find(']')) {
        (Some(i), Some(j)) if i < j => {
            // Ensure that we don't have more brackets
            if line.rfind('[').unwrap() != i || line.rfind(']').unwrap() != j {
                return Err(LineParsingError::from_kind(
                    line,
                    LineErrorKind::UnmatchedBrackets,
                ));
            }

            let head = line.get(..i).unwrap();
            let inside = line.get(i + 1..j).unwrap();
            let tail = line.get(j + 1..).unwrap();

            let label = format!("{}{}", head, inside);
            let text = format!("{}{}", head, tail);

            Ok((label, text))
        }
        (None, None) => Ok((line.to_string(), line.to_string())),
        _ => Err(LineParsingError::from_kind(
            line,
            LineErrorKind::UnmatchedBrackets,
        )),
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub fn parse_choice_item(line: &str) -> Item {
        match parse_choice(line).unwrap().unwrap() {
            ParsedLineKind::Choice { item, .. } => item,
            other => panic!("expected `ParsedLineKind::Choice` but got {:?}", other),
        }
    }

    fn get_choice(item: &Item) -> &Choice {
        match item {
            Item::Choice(choice) => choice,
            other => panic!("expected `Item::Choice` but got {:?}", other),
        }
    }

    #[test]
    fn parsing_line_with_no_choice_markers_returns_none() {
        assert!(parse_choice_markers_and_text("Choice").unwrap().is_none());
        assert!(parse_choice_markers_and_text("  Choice  ")
            .unwrap()
            .is_none());
        assert!(parse_choice_markers_and_text("- Choice  ")
            .unwrap()
            .is_none());
    }

    #[test]
    fn parsing_line_with_choice_markers_gets_number_of_markers() {
        let (level, _, _) = parse_choice_markers_and_text("* Choice").unwrap().unwrap();
        assert_eq!(level, 1);

        let (level, _, _) = parse_choice_markers_and_text("** Choice").unwrap().unwrap();
        assert_eq!(level, 2);

        let (level, _, _) = parse_choice_markers_and_text("**** Choice")
            .unwrap()
            .unwrap();
        assert_eq!(level, 4);
    }

    #[test]
    fn number_of_markers_parsing_ignores_whitespace() {
        let (level, _, _) = parse_choice_markers_and_text("  * * *   *     Choice")
            .unwrap()
            .unwrap();
        assert_eq!(level, 4);
    }

    #[test]
    fn sticky_choice_markers_give_sticky_choices_and_vice_versa() {
        let (_, is_sticky, _) = parse_choice_markers_and_text("* Choice").unwrap().unwrap();
        assert!(!is_sticky);

        let (_, is_sticky, _) = parse_choice_markers_and_text("+ Choice").unwrap().unwrap();
        assert!(is_sticky);
    }

    #[test]
    fn lines_cannot_have_both_sticky_and_non_sticky_markers_in_the_head() {
        assert!(parse_choice_markers_and_text("*+ Choice").is_err());
        assert!(parse_choice_markers_and_text("+* Choice").is_err());
        assert!(parse_choice_markers_and_text(" +++*+ Choice").is_err());
        assert!(parse_choice_markers_and_text("+ Choice *").is_ok());
    }

    #[test]
    fn simple_line_parses_into_choice_with_same_label_and_text() {
        let item = parse_choice_item("* Choice line");
        let choice = get_choice(&item);

        assert_eq!(&choice.label, "Choice line");
        assert_eq!(&choice.text, "Choice line");
        assert!(!choice.sticky);
    }

    #[test]
    fn bracketed_content_belongs_only_to_the_label() {
        let item = parse_choice_item("* Hello[.], World!");
        let choice = get_choice(&item);

        assert_eq!(&choice.label, "Hello.");
        assert_eq!(&choice.text, "Hello, World!");
    }

    #[test]
    fn content_after_the_bracket_belongs_only_to_the_continuation() {
        let item = parse_choice_item("* [Run!]You make a run for it.");
        let choice = get_choice(&item);

        assert_eq!(&choice.label, "Run!");
        assert_eq!(&choice.text, "You make a run for it.");
    }

    #[test]
    fn choice_with_jump_records_the_address() {
        let item = parse_choice_item("* Onwards -> next_knot");
        let choice = get_choice(&item);

        assert_eq!(&choice.label, "Onwards");
        assert_eq!(choice.jump, Some(Address::from_path("next_knot")));
    }

    #[test]
    fn choice_with_no_text_is_a_fallback() {
        let item = parse_choice_item("* -> exit");
        let choice = get_choice(&item);

        assert!(choice.label.is_empty());
        assert!(choice.text.is_empty());
        assert_eq!(choice.jump, Some(Address::from_path("exit")));
    }

    #[test]
    fn fallback_choice_may_jump_to_nothing() {
        let item = parse_choice_item("* ->");
        let choice = get_choice(&item);

        assert!(choice.label.is_empty());
        assert!(choice.jump.as_ref().unwrap().is_empty());
    }

    #[test]
    fn fallback_choice_may_have_no_jump_at_all() {
        let item = parse_choice_item("*");
        let choice = get_choice(&item);

        assert!(choice.label.is_empty());
        assert!(choice.jump.is_none());
    }

    #[test]
    fn condition_in_braces_wraps_the_choice_in_a_condition_item() {
        let item = parse_choice_item("* {has_key} Open the door");

        match item {
            Item::Condition(condition) => {
                assert_eq!(&condition.condition, "has_key");
                assert!(condition.failure.is_none());
                assert_eq!(condition.success.len(), 1);

                let choice = get_choice(&condition.success[0]);
                assert_eq!(&choice.label, "Open the door");
            }
            other => panic!("expected `Item::Condition` but got {:?}", other),
        }
    }

    #[test]
    fn conditional_fallback_choice_parses() {
        let item = parse_choice_item("* {lost} ->");

        match item {
            Item::Condition(condition) => {
                let choice = get_choice(&condition.success[0]);
                assert!(choice.text.is_empty());
            }
            other => panic!("expected `Item::Condition` but got {:?}", other),
        }
    }

    #[test]
    fn jump_address_must_end_the_line() {
        match parse_choice("* Choice -> target and more") {
            Err(LineParsingError {
                kind: LineErrorKind::ExpectedEndOfLine { tail },
                ..
            }) => assert_eq!(&tail, "and more"),
            other => panic!(
                "expected `LineErrorKind::ExpectedEndOfLine` but got {:?}",
                other
            ),
        }
    }

    #[test]
    fn jump_marker_inside_braces_does_not_split_the_choice() {
        let item = parse_choice_item("* {seen -> 0} A fresh start");

        match item {
            Item::Condition(condition) => assert_eq!(&condition.condition, "seen -> 0"),
            other => panic!("expected `Item::Condition` but got {:?}", other),
        }
    }

    #[test]
    fn invalid_jump_address_yields_error() {
        assert!(parse_choice("* Choice -> bad$address").is_err());
        assert!(parse_choice("* Choice -> a.b.c.d").is_err());
    }

    #[test]
    fn unmatched_brackets_yield_error() {
        assert!(parse_choice("* Hello[!, World!").is_err());
        assert!(parse_choice("* Hello]!, World!").is_err());
        assert!(parse_choice("* Hello[!], [Worl] d!").is_err());
        assert!(parse_choice("* Hello][, World!").is_err());
    }

    #[test]
    fn sticky_markers_make_sticky_choices() {
        let item = parse_choice_item("+ Try again");
        assert!(get_choice(&item).sticky);
    }
}
