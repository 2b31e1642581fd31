//! Request DTOs for the API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::{Deserialize, Deserializer};

use crate::models::Product;

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Request body for creating a product (POST /api/products)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub author: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    /// Units in stock, 0 when omitted
    #[serde(default)]
    pub stock: Option<i64>,
}

/// Request body for a partial product update (PUT /api/products/:id)
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub isbn: Option<String>,
    pub stock: Option<i64>,
}

impl UpdateProductRequest {
    /// Copies every provided field onto `product`.
    pub fn apply(self, product: &mut Product) {
        if let Some(title) = self.title {
            product.title = title;
        }
        if let Some(author) = self.author {
            product.author = author;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = Some(category);
        }
        if let Some(publisher) = self.publisher {
            product.publisher = Some(publisher);
        }
        if let Some(isbn) = self.isbn {
            product.isbn = Some(isbn);
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

/// Query string filters for GET /api/products
///
/// # Fields
/// - `category`: trimmed, case-insensitive exact match
/// - `minPrice` / `maxPrice`: inclusive price bounds; a bound that is not a
///   finite number is ignored rather than rejected
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub max_price: Option<f64>,
}

/// Accepts a number or numeric text; anything else reads as no bound.
fn lenient_price<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bound {
        Number(f64),
        Text(String),
    }

    let price = match Option::<Bound>::deserialize(deserializer)? {
        Some(Bound::Number(n)) => Some(n),
        Some(Bound::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    };
    Ok(price.filter(|p| p.is_finite()))
}

impl ProductQuery {
    /// Returns true if `product` passes every filter that is set.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            let wanted = category.trim();
            let matched = product
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(wanted));
            if !matched {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        true
    }
}

/// Request body for POST /api/register
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub age: Option<u32>,
}

impl RegisterRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.username.trim().is_empty() {
            return Some("Username is required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Some("A valid email is required".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Some(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ));
        }
        None
    }
}

/// Request body for POST /api/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
