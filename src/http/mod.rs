//! HTTP protocol layer module
//!
//! Protocol-level building blocks shared by the request handlers: range
//! resolution, chunked bodies, response builders, MIME detection, and
//! conditional request validators.

pub mod body;
pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use body::ResponseBody;
pub use range::{resolve_range, RangeOutcome};
pub use response::{
    build_304_response, build_404_response, build_405_response, build_416_response,
    build_health_response, build_options_response,
};
