//! Route modules, one per API surface. Each exposes a `router()` that
//! the application assembly in `lib.rs` merges under a shared state.

pub mod appointments;
pub mod auth;
pub mod contact;
pub mod courses;
pub mod testimonials;
pub mod therapies;
