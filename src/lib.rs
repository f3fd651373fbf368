pub mod banner;
pub mod chat;
pub mod client;
pub mod competitor;
pub mod config;
pub mod consts;
pub mod discover;
pub mod engine;
pub mod enrich;
pub mod prompts;
pub mod search;
pub mod server;
pub mod spinner;
