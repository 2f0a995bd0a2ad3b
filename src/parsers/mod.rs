pub mod duration_grammar;
pub mod line_parser;
pub mod value_parser;
