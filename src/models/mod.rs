//! Domain documents and request/response models for the API
//!
//! This module defines the stored documents and the DTOs (Data Transfer
//! Objects) used for serializing/deserializing HTTP bodies.

pub mod product;
pub mod requests;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use product::Product;
pub use requests::{
    CreateProductRequest, LoginRequest, ProductQuery, RegisterRequest, UpdateProductRequest,
};
pub use responses::{AuthResponse, ErrorResponse, HealthResponse, MessageResponse};
pub use user::{User, DEFAULT_ROLE};
