//! Host networking for Glyphcast
//!
//! Implements the core's transport and connectivity traits on top of the
//! standard library and `ureq`, so the full pipeline can run on a desktop
//! against a real font service.

pub mod http;
pub mod link;

pub use http::{font_service, UreqClient, MAX_BODY_BYTES};
pub use link::HostLink;
