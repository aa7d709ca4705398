pub mod list_tags;
pub mod suggest_tags;
