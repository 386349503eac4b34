//! Service layer for the product resource.
//! - Validates raw request payloads into typed inputs.
//! - Hides the store implementation (memory or SeaORM) behind `ProductStore`.
//! - `ProductService` is the only entry point the HTTP layer uses.

pub mod errors;
pub mod product;

pub use product::{build_store, service::ProductService};
