//! Request and response payloads, one module per API version.
//!
//! Create/Update payloads use optional members so a missing member is
//! reported by validation (`required`) instead of a deserialization error.

pub mod v1;
pub mod v2;
