pub mod config;
pub mod logging;

pub mod artifact;
pub mod checksum;
pub mod encoder;
pub mod history_db;
pub mod media;
pub mod notes;
pub mod pipeline;
pub mod retry;
pub mod store;
pub mod upstream;
