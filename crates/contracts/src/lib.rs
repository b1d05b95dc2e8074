//! Transport types shared with the commerce API.
//!
//! The dashboard never owns these entities; it fetches them, edits local
//! selections/forms over them and posts partial payloads back.

pub mod domain;
pub mod shared;
