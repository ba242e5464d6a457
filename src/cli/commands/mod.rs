//! CLI command implementations.

mod ask;
mod book;
mod chat;
mod config;
mod doctor;
mod serve;
mod slots;

pub use ask::run_ask;
pub use book::run_book;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use serve::run_serve;
pub use slots::run_slots;
