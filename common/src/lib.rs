//! Common code shared between `classify_server` and `snap_sender`.
pub mod protocol;

/// Error type.
pub type Error = Box<dyn std::error::Error>;
