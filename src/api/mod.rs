// Vimeo API communication layer
//
// - auth:   fixed request headers built from the access token
// - client: HTTP transport with timeout and error mapping
// - types:  per-call result wrapper and response projections

pub mod auth;
pub mod client;
pub mod error;
pub mod types;
