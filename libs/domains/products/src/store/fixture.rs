use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, fixture_products};
use crate::repository::{ProductRepository, ProductStore};

/// Read-only store over a fixed list of products. Every write fails with
/// [`ProductError::Unsupported`].
#[derive(Debug, Clone)]
pub struct FixtureProductStore {
    products: Arc<[Product]>,
}

impl FixtureProductStore {
    pub fn new() -> Self {
        Self::with_products(fixture_products())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }
}

impl Default for FixtureProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for FixtureProductStore {
    type Session = FixtureSession;

    fn session(&self) -> Self::Session {
        FixtureSession {
            products: Arc::clone(&self.products),
        }
    }

    async fn ping(&self) -> ProductResult<()> {
        Ok(())
    }
}

pub struct FixtureSession {
    products: Arc<[Product]>,
}

#[async_trait]
impl ProductRepository for FixtureSession {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.to_vec())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&mut self, _product: Product) -> ProductResult<Product> {
        Err(ProductError::Unsupported("create"))
    }

    async fn update(&mut self, _product: Product) -> ProductResult<()> {
        Err(ProductError::Unsupported("update"))
    }

    async fn delete(&mut self, _product: Product) -> ProductResult<()> {
        Err(ProductError::Unsupported("delete"))
    }

    async fn persist(&mut self) -> ProductResult<()> {
        Err(ProductError::Unsupported("persist"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_mock_products() {
        let session = FixtureProductStore::new().session();
        let products = session.list().await.unwrap();

        assert_eq!(products.len(), 4);
        assert!(products.iter().all(|p| p.name.starts_with("Mock ")));
        assert_eq!(products[0].id, 0);
    }

    #[tokio::test]
    async fn test_get_by_id_searches_the_list() {
        let session = FixtureProductStore::new().session();

        assert_eq!(session.get_by_id(2).await.unwrap().unwrap().name, "Mock Ducky One 2 Mini");
        assert!(session.get_by_id(4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_writes_are_unsupported() {
        let mut session = FixtureProductStore::new().session();

        let err = session.create(Product::new("Keyboard X", 1, 1.0, "g")).await.unwrap_err();
        assert!(matches!(err, ProductError::Unsupported("create")));
        assert!(matches!(session.persist().await, Err(ProductError::Unsupported(_))));
    }
}
