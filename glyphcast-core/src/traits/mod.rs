//! Collaborator traits
//!
//! These traits define the interface between the glyph pipeline and the
//! pieces that depend on the platform: the HTTP stack, the panel driver and
//! network join management.

pub mod connectivity;
pub mod display;
pub mod glyph_source;
pub mod http;

pub use connectivity::Connectivity;
pub use display::{DisplayError, PixelDisplay};
pub use glyph_source::GlyphSource;
pub use http::{HttpClient, HttpResponse, NetworkError};
