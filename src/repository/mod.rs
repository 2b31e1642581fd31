//! Repository Module
//!
//! Document-store interface for products and users. Handlers only talk to
//! these traits; the in-memory implementations back development and tests.

mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Product, ProductQuery, User};

pub use memory::{InMemoryProductRepository, InMemoryUserRepository};

// == Product Repository ==
/// Storage for [`Product`] documents.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a new product; fails with `Conflict` on a duplicate ISBN.
    async fn create(&self, product: Product) -> Result<Product>;

    /// Returns every product matching `query`, in insertion order.
    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>>;

    /// Replaces a stored product; fails with `NotFound` if it is gone and
    /// `Conflict` if the ISBN now collides with another product.
    async fn save(&self, product: Product) -> Result<Product>;

    /// Removes a product, returning whether it existed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

// == User Repository ==
/// Storage for [`User`] documents.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user; fails with `Conflict` on a duplicate email.
    async fn create(&self, user: User) -> Result<User>;

    async fn find_all(&self) -> Result<Vec<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Case-insensitive lookup by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Removes a user, returning whether it existed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
