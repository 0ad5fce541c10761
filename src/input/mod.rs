pub mod line_parser;
pub mod log_reader;

pub use line_parser::parse_line;
pub use log_reader::LogReader;
