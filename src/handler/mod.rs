//! Request handler module
//!
//! Routing dispatch plus the resource streaming responder. Authorization is
//! an upstream concern; everything that reaches these handlers is already
//! allowed to read what it asks for.

pub mod router;
pub mod stream_files;

// Re-export main entry point
pub use router::handle_request;
