//! In-memory repositories.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{Product, ProductQuery, User};
use crate::repository::{ProductRepository, UserRepository};

// == Products ==
/// Products kept in insertion order behind an async lock.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn isbn_taken(products: &[Product], isbn: Option<&str>, except: Uuid) -> bool {
    match isbn {
        Some(isbn) => products
            .iter()
            .any(|p| p.id != except && p.isbn.as_deref() == Some(isbn)),
        None => false,
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product> {
        let mut products = self.products.write().await;
        if isbn_taken(&products, product.isbn.as_deref(), product.id) {
            return Err(ApiError::Conflict(
                "A product with this ISBN already exists".to_string(),
            ));
        }
        products.push(product.clone());
        Ok(product)
    }

    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| query.matches(p)).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, product: Product) -> Result<Product> {
        let mut products = self.products.write().await;
        if isbn_taken(&products, product.isbn.as_deref(), product.id) {
            return Err(ApiError::Conflict(
                "A product with this ISBN already exists".to_string(),
            ));
        }
        let slot = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;
        *slot = product.clone();
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() != before)
    }
}

// == Users ==
/// Users kept in registration order behind an async lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(ApiError::Conflict("User already exists".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }
}
