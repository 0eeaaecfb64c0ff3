//! Mutable state for a single parse: the current knot and stitch cursors
//! and the stack of open containers which maps marker-counted levels onto
//! tree depth.

use crate::{
    consts::ROOT_NAME,
    line::Item,
    story::Document,
};

/// State owned by one parse invocation.
///
/// Containers on the stack are open: their items are still being appended
/// to. Index 0 is the root container of the current knot and stitch. Every
/// entry above it was opened by a choice, and is attached to that choice's
/// `node` once a line at an equal or shallower level closes it.
pub struct ParseContext {
    document: Document,
    current_knot: String,
    current_stitch: String,
    nodes_chain: Vec<Vec<Item>>,
}

impl ParseContext {
    /// Create the context for a fresh parse, positioned in the implicit
    /// root knot and stitch.
    pub fn new() -> Self {
        ParseContext {
            document: Document::new(),
            current_knot: ROOT_NAME.to_string(),
            current_stitch: ROOT_NAME.to_string(),
            nodes_chain: vec![Vec::new()],
        }
    }

    /// Mutable access to the document under construction.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Move the cursor to a new knot, implicitly in its root stitch.
    ///
    /// The nesting stack is replaced with a single fresh container: knots
    /// never nest under the content which preceded them.
    pub fn add_knot(&mut self, name: &str) {
        self.flush();

        self.current_knot = name.to_string();
        self.current_stitch = ROOT_NAME.to_string();

        self.register();
    }

    /// Move the cursor to a new stitch within the current knot.
    pub fn add_stitch(&mut self, name: &str) {
        self.flush();

        self.current_stitch = name.to_string();

        self.register();
    }

    /// Append an item at the given level.
    ///
    /// Level 0 appends to the innermost open container without closing
    /// anything. Any other level first closes every container opened at a
    /// deeper level, then appends to the container now innermost.
    pub fn append_at(&mut self, level: u32, item: Item) {
        let level = if level == 0 {
            self.nodes_chain.len()
        } else {
            level as usize
        };

        while self.nodes_chain.len() > level {
            self.close_top();
        }

        self.nodes_chain.last_mut().unwrap().push(item);
    }

    /// Append a choice item at the given level and open its node container.
    ///
    /// Subsequent lines at deeper levels land inside the container until a
    /// line at an equal or shallower level truncates it away.
    pub fn add_choice(&mut self, level: u32, item: Item) {
        self.append_at(level, item);
        self.nodes_chain.push(Vec::new());
    }

    /// Finish the parse and return the completed document.
    pub fn into_document(mut self) -> Document {
        self.flush();
        self.document
    }

    /// Close the innermost open container and attach its items to the
    /// choice which opened it.
    ///
    /// The choice is the last item of the parent container: nothing can be
    /// appended there in between, since any such line would have closed
    /// this container first. A conditional choice is found through its
    /// condition wrapper.
    fn close_top(&mut self) {
        let node = self.nodes_chain.pop().unwrap();
        let parent = self.nodes_chain.last_mut().unwrap();

        match parent.last_mut() {
            Some(Item::Choice(choice)) => choice.node = node,
            Some(Item::Condition(condition)) => {
                if let Some(Item::Choice(choice)) = condition.success.first_mut() {
                    choice.node = node;
                }
            }
            _ => (),
        }
    }

    /// Close all open containers and store the collected content under the
    /// current knot and stitch.
    fn flush(&mut self) {
        while self.nodes_chain.len() > 1 {
            self.close_top();
        }

        let items = self.nodes_chain.pop().unwrap();

        self.document
            .root
            .entry(self.current_knot.clone())
            .or_insert_with(Default::default)
            .entry(self.current_stitch.clone())
            .or_insert_with(Vec::new)
            .extend(items);
    }

    /// Register the current knot and stitch in the document and reset the
    /// nesting stack to a single fresh container.
    fn register(&mut self) {
        self.document
            .root
            .entry(self.current_knot.clone())
            .or_insert_with(Default::default)
            .entry(self.current_stitch.clone())
            .or_insert_with(Vec::new);

        self.nodes_chain = vec![Vec::new()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::line::{Choice, Text};

    fn text_item(content: &str) -> Item {
        Item::Text(Text::from_string(content))
    }

    fn choice_item() -> Item {
        Item::Choice(Choice::default())
    }

    #[test]
    fn items_appended_at_level_zero_go_to_the_root_container() {
        let mut context = ParseContext::new();

        context.append_at(0, text_item("one"));
        context.append_at(0, text_item("two"));

        let document = context.into_document();
        let items = document.items(ROOT_NAME, ROOT_NAME).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0], text_item("one"));
        assert_eq!(items[1], text_item("two"));
    }

    #[test]
    fn level_zero_appends_to_the_innermost_open_container() {
        let mut context = ParseContext::new();

        context.add_choice(1, choice_item());
        context.append_at(0, text_item("nested"));

        let document = context.into_document();
        let items = document.items(ROOT_NAME, ROOT_NAME).unwrap();

        assert_eq!(items.len(), 1);

        match &items[0] {
            Item::Choice(choice) => {
                assert_eq!(choice.node.len(), 1);
                assert_eq!(choice.node[0], text_item("nested"));
            }
            other => panic!("expected `Item::Choice` but got {:?}", other),
        }
    }

    #[test]
    fn deeper_choices_nest_inside_the_previous_choice() {
        let mut context = ParseContext::new();

        context.add_choice(1, choice_item());
        context.add_choice(2, choice_item());
        context.add_choice(1, choice_item());

        let document = context.into_document();
        let items = document.items(ROOT_NAME, ROOT_NAME).unwrap();

        assert_eq!(items.len(), 2);

        match &items[0] {
            Item::Choice(choice) => {
                assert_eq!(choice.node.len(), 1);

                match &choice.node[0] {
                    Item::Choice(inner) => assert!(inner.node.is_empty()),
                    other => panic!("expected `Item::Choice` but got {:?}", other),
                }
            }
            other => panic!("expected `Item::Choice` but got {:?}", other),
        }
    }

    #[test]
    fn item_at_shallow_level_closes_deeper_containers() {
        let mut context = ParseContext::new();

        context.add_choice(1, choice_item());
        context.append_at(0, text_item("nested"));
        context.append_at(1, text_item("gather"));

        let document = context.into_document();
        let items = document.items(ROOT_NAME, ROOT_NAME).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1], text_item("gather"));
    }

    #[test]
    fn over_deep_levels_append_to_the_innermost_container() {
        let mut context = ParseContext::new();

        context.add_choice(3, choice_item());
        context.add_choice(5, choice_item());

        let document = context.into_document();
        let items = document.items(ROOT_NAME, ROOT_NAME).unwrap();

        assert_eq!(items.len(), 1);

        match &items[0] {
            Item::Choice(choice) => assert_eq!(choice.node.len(), 1),
            other => panic!("expected `Item::Choice` but got {:?}", other),
        }
    }

    #[test]
    fn closing_a_conditional_choice_attaches_the_node_through_the_wrapper() {
        use crate::line::Condition;

        let mut context = ParseContext::new();

        let wrapped = Item::Condition(Condition {
            condition: "brave".to_string(),
            success: vec![choice_item()],
            failure: None,
        });

        context.add_choice(1, wrapped);
        context.append_at(0, text_item("nested"));

        let document = context.into_document();
        let items = document.items(ROOT_NAME, ROOT_NAME).unwrap();

        match &items[0] {
            Item::Condition(condition) => match &condition.success[0] {
                Item::Choice(choice) => assert_eq!(choice.node.len(), 1),
                other => panic!("expected `Item::Choice` but got {:?}", other),
            },
            other => panic!("expected `Item::Condition` but got {:?}", other),
        }
    }

    #[test]
    fn adding_a_knot_moves_the_cursor_and_resets_the_stack() {
        let mut context = ParseContext::new();

        context.add_choice(1, choice_item());
        context.add_knot("mirandola");
        context.append_at(0, text_item("inside"));

        let document = context.into_document();

        assert_eq!(document.items(ROOT_NAME, ROOT_NAME).unwrap().len(), 1);

        let items = document.items("mirandola", ROOT_NAME).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0], text_item("inside"));
    }

    #[test]
    fn adding_a_stitch_registers_it_under_the_current_knot() {
        let mut context = ParseContext::new();

        context.add_knot("mirandola");
        context.add_stitch("cinema");
        context.append_at(0, text_item("inside"));

        let document = context.into_document();

        assert!(document.items("mirandola", ROOT_NAME).is_some());
        assert_eq!(document.items("mirandola", "cinema").unwrap().len(), 1);
    }

    #[test]
    fn knots_register_their_root_stitch_even_without_content() {
        let mut context = ParseContext::new();

        context.add_knot("empty");

        let document = context.into_document();
        assert!(document.items("empty", ROOT_NAME).unwrap().is_empty());
    }
}
