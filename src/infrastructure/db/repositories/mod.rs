pub mod client_repository_sqlx;
pub mod tag_repository_sqlx;
pub mod tagging_repository_sqlx;
