use skein::*;

#[test]
fn list_declaration_round_trip() {
    let document = read_document_from_string("LIST Colors = red, green, (blue)").unwrap();

    assert_eq!(
        document.lists.get("Colors").unwrap(),
        &vec!["red".to_string(), "green".to_string(), "blue".to_string()]
    );

    match document.variables.get("Colors").unwrap() {
        Value::List(lists) => {
            let members = lists.get("Colors").unwrap();

            assert_eq!(members.len(), 1);
            assert_eq!(members.get("blue"), Some(&true));
        }
        other => panic!("expected `Value::List` but got {:?}", other),
    }
}

#[test]
fn list_declaration_with_no_active_members_gives_an_empty_member_map() {
    let document = read_document_from_string("LIST Moods = calm, angry").unwrap();

    match document.variables.get("Moods").unwrap() {
        Value::List(lists) => assert!(lists.get("Moods").unwrap().is_empty()),
        other => panic!("expected `Value::List` but got {:?}", other),
    }
}

#[test]
fn list_declaration_with_several_active_members_records_them_all() {
    let document =
        read_document_from_string("LIST Doors = (front), back, (cellar)").unwrap();

    match document.variables.get("Doors").unwrap() {
        Value::List(lists) => {
            let members = lists.get("Doors").unwrap();

            assert_eq!(members.len(), 2);
            assert_eq!(members.get("front"), Some(&true));
            assert_eq!(members.get("cellar"), Some(&true));
        }
        other => panic!("expected `Value::List` but got {:?}", other),
    }
}

#[test]
fn constant_declarations_deserialize_scalar_literals() {
    let content = "\
CONST max_hp = 10
CONST pi = 3.14
CONST greeting = \"good morning\"
CONST debug = false
";

    let document = read_document_from_string(content).unwrap();

    assert_eq!(document.constants.get("max_hp"), Some(&Value::Int(10)));
    assert_eq!(document.constants.get("pi"), Some(&Value::Float(3.14)));
    assert_eq!(
        document.constants.get("greeting"),
        Some(&Value::String("good morning".to_string()))
    );
    assert_eq!(document.constants.get("debug"), Some(&Value::Bool(false)));
}

#[test]
fn variable_declarations_deserialize_scalar_literals() {
    let content = "\
VAR hp = 7
VAR name = \"Ada\"
";

    let document = read_document_from_string(content).unwrap();

    assert_eq!(document.variables.get("hp"), Some(&Value::Int(7)));
    assert_eq!(
        document.variables.get("name"),
        Some(&Value::String("Ada".to_string()))
    );
}

#[test]
fn non_literal_right_hand_sides_are_recorded_as_expressions() {
    let document = read_document_from_string("VAR total = base + bonus").unwrap();

    assert_eq!(
        document.variables.get("total"),
        Some(&Value::Expression("base + bonus".to_string()))
    );
}

#[test]
fn duplicate_declarations_are_last_write_wins() {
    let content = "\
CONST limit = 1
CONST limit = 2
VAR hp = 1
VAR hp = 2
LIST Keys = (a)
LIST Keys = b
";

    let document = read_document_from_string(content).unwrap();

    assert_eq!(document.constants.get("limit"), Some(&Value::Int(2)));
    assert_eq!(document.variables.get("hp"), Some(&Value::Int(2)));
    assert_eq!(document.lists.get("Keys").unwrap(), &vec!["b".to_string()]);
}

#[test]
fn declarations_may_appear_after_content_lines() {
    let content = "\
Some content first.
VAR late = true
";

    let document = read_document_from_string(content).unwrap();

    assert_eq!(document.variables.get("late"), Some(&Value::Bool(true)));
    assert_eq!(document.items(ROOT_NAME, ROOT_NAME).unwrap().len(), 1);
}

#[test]
fn assignment_statements_become_assign_items() {
    let document = read_document_from_string("~ strength = 3 + 4").unwrap();

    let items = document.items(ROOT_NAME, ROOT_NAME).unwrap();

    match &items[0] {
        Item::Assign(assign) => {
            assert!(!assign.temporary);
            assert_eq!(&assign.variable, "strength");
            assert_eq!(&assign.value, "3 + 4");
        }
        other => panic!("expected `Item::Assign` but got {:?}", other),
    }
}

#[test]
fn temporary_assignments_are_marked() {
    let document = read_document_from_string("~ temp count = 0").unwrap();

    let items = document.items(ROOT_NAME, ROOT_NAME).unwrap();

    match &items[0] {
        Item::Assign(assign) => {
            assert!(assign.temporary);
            assert_eq!(&assign.variable, "count");
        }
        other => panic!("expected `Item::Assign` but got {:?}", other),
    }
}

#[test]
fn compound_shorthand_parses_identically_to_the_explicit_form() {
    let shorthand = read_document_from_string("~ x += 3").unwrap();
    let explicit = read_document_from_string("~ x = x + 3").unwrap();

    assert_eq!(
        shorthand.items(ROOT_NAME, ROOT_NAME).unwrap(),
        explicit.items(ROOT_NAME, ROOT_NAME).unwrap()
    );

    let incremented = read_document_from_string("~ lives++").unwrap();

    match &incremented.items(ROOT_NAME, ROOT_NAME).unwrap()[0] {
        Item::Assign(assign) => {
            assert_eq!(&assign.variable, "lives");
            assert_eq!(&assign.value, "lives + 1");
        }
        other => panic!("expected `Item::Assign` but got {:?}", other),
    }
}

#[test]
fn keyword_lines_which_do_not_complete_their_shape_are_paragraphs() {
    let content = "\
VAR alone
CONSTANT x = 1
INCLUDE
LISTless = a, b
";

    let document = read_document_from_string(content).unwrap();

    assert!(document.variables.is_empty());
    assert!(document.constants.is_empty());
    assert!(document.includes.is_empty());
    assert!(document.lists.is_empty());

    assert_eq!(document.items(ROOT_NAME, ROOT_NAME).unwrap().len(), 4);
}
