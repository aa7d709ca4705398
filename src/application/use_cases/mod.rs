pub mod clients;
pub mod tags;
