//! # Quill Shared
//!
//! Wire types shared by the server and anything that talks to it:
//! form payloads and problem-details error bodies.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
