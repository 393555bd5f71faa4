//! Typed request and response shapes for the mall backend.
//!
//! Field names follow the backend's camelCase JSON. Fields the backend
//! sends as `null` (or omits) are `Option`.

pub mod address;
pub mod cart;
pub mod category;
pub mod global;
pub mod goods;
pub mod home;
pub mod hot;
pub mod member;
pub mod order;

pub use global::{PageParams, PageResult};
