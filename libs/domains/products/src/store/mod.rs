//! Store implementations selectable at startup.

pub mod fixture;
pub mod memory;

pub use fixture::FixtureProductStore;
pub use memory::InMemoryProductStore;
