// Lexical extraction primitives shared by the text-based extractors

pub mod declarations;
pub mod parameters;
pub mod scanner;

pub use declarations::{
    declaration_span, normalize_whitespace, parameter_list, reassemble_declaration,
    reassemble_declaration_bounded, DEFAULT_MAX_DECLARATION_LINES,
};
pub use parameters::{parse_parameter, parse_parameter_list, split_top_level_commas};
pub use scanner::{
    mask_string_literals, matching_paren, split_leading_annotations, strip_line_comment,
    LeadingAnnotation, LexicalScanner, LineSummary, QuoteState,
};
