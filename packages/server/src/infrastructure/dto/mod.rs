//! Data Transfer Objects (DTOs) for the chat application.
//!
//! - `http`: HTTP API request/response DTOs
//! - `conversion`: Domain entity → DTO conversions

pub mod conversion;
pub mod http;
