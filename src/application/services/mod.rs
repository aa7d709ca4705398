pub mod search;
pub mod tagging;
