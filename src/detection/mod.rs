pub mod brute_force;
pub mod extractor;

pub use brute_force::detect_brute_force;
pub use extractor::{extract, extract_file, extract_parallel, extract_reader};
