//! lectern - HTTP origin server for lecture media
//!
//! Serves a directory of lecture recordings and course documents over
//! HTTP/1.1 with byte-range streaming (200/206/416), so browser media
//! players can seek without the server ever buffering a whole file.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod store;
