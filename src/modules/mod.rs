//! Feature modules, one per resource.
//!
//! Each module follows the same structure:
//!
//! - `model.rs`: entities, request/response DTOs
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: data-store operations
//! - `router.rs`: route wiring

pub mod cart;
pub mod order_items;
pub mod products;
pub mod users;
