pub mod create_client;
pub mod delete_client;
pub mod error;
pub mod get_client;
pub mod list_clients;
pub mod update_client;
