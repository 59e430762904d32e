//! Paper records and the record loader at the provider boundary

pub mod records;

pub use records::{author_key, load_records, parse_records, PaperRecord};
