pub mod client_repository;
pub mod tag_repository;
pub mod tagging_repository;
