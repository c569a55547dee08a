//! OneBot Admin client library.
//!
//! Talks to the OneBot REST API on behalf of an administrator: signs in
//! through Firebase, manages chatbots, and loads and saves their embeddable
//! widget configurations. The widget model itself lives in the `widget`
//! crate; this crate adds configuration, HTTP, identity and services.

pub mod api;
pub mod auth;
pub mod config;
pub mod notify;
pub mod services;
