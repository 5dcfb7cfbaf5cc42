pub mod config;
pub mod expand;
