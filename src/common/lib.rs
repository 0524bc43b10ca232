pub mod error;
pub mod read_structure;
pub mod run_date;
pub mod run_info_parser;
pub mod run_metadata;
