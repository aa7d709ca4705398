pub mod clients;
pub mod error;
pub mod health;
pub mod tags;
