pub mod client_repository_rest;
pub mod tag_repository_rest;
pub mod tagging_repository_rest;
