// Format version stamps for produced documents
pub const ENGINE_VERSION: u32 = 1;
pub const TREE_VERSION: u32 = 1;

// Level control markers
pub const CHOICE_MARKER: char = '*';
pub const STICKY_CHOICE_MARKER: char = '+';
pub const GATHER_MARKER: char = '-';

// Text markers
pub const JUMP_MARKER: &'static str = "->";
pub const GLUE_MARKER: &'static str = "<>";
pub const TAG_MARKER: &'static str = "#";
pub const EXPRESSION_MARKER: char = '#';

// Section markers
pub const KNOT_MARKER: &'static str = "==";
pub const STITCH_MARKER: &'static str = "=";
pub const ROOT_NAME: &'static str = "_";

// Statement keywords
pub const INCLUDE_KEYWORD: &'static str = "INCLUDE";
pub const LIST_KEYWORD: &'static str = "LIST";
pub const CONST_KEYWORD: &'static str = "CONST";
pub const VARIABLE_KEYWORD: &'static str = "VAR";
pub const ASSIGNMENT_MARKER: char = '~';
pub const TEMPORARY_KEYWORD: &'static str = "temp";

// Sequence mode sigils
pub const ONCE_ONLY_MARKER: char = '!';
pub const CYCLE_MARKER: char = '&';
pub const SHUFFLE_MARKER: char = '~';
pub const SEQUENCE_SEPARATOR: &'static str = "|";
pub const CONDITION_SEPARATOR: &'static str = ":";

// Comment forms
pub const LINE_COMMENT_MARKER: &'static str = "//";
pub const BLOCK_COMMENT_OPEN: &'static str = "/*";
pub const BLOCK_COMMENT_CLOSE: &'static str = "*/";
pub const TODO_COMMENT_MARKER: &'static str = "TODO:";
