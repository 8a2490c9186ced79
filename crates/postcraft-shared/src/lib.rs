//! # Postcraft Shared
//!
//! Wire types shared between the studio server and its front ends.
//! Kept free of domain dependencies so a WASM client can compile it as-is.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
