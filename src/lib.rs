pub mod cli;
pub mod error;
pub mod feed;
pub mod github;
pub mod headers;
pub mod models;
pub mod server;
pub mod showcase;
pub mod types;
