//! Field-for-field conversions between [`Product`](crate::models::Product)
//! and the versioned DTOs. Absent input members map to the field default;
//! validation runs before any of these are called.

pub mod v1;
pub mod v2;
