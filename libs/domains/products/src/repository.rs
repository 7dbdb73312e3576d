use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::Product;

/// A unit of work over the product table.
///
/// Writes are staged until [`persist`](ProductRepository::persist); dropping
/// a session without persisting discards them. Sessions are per request and
/// never shared between tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ordered by id where the store has an order.
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// `None` when no product has this id.
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Registers a new product and returns it with its assigned id.
    ///
    /// Rejects a product that already carries an id.
    async fn create(&mut self, product: Product) -> ProductResult<Product>;

    /// Writes every field of an already stored product.
    async fn update(&mut self, product: Product) -> ProductResult<()>;

    async fn delete(&mut self, product: Product) -> ProductResult<()>;

    /// Commits all staged writes at once.
    async fn persist(&mut self) -> ProductResult<()>;
}

/// Shared handle that opens [`ProductRepository`] sessions.
#[cfg_attr(test, mockall::automock(type Session = MockProductRepository;))]
#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
    type Session: ProductRepository + 'static;

    fn session(&self) -> Self::Session;

    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> ProductResult<()>;
}

pub(crate) fn ensure_unassigned(product: &Product) -> ProductResult<()> {
    if product.is_assigned() {
        return Err(crate::error::ProductError::InvalidArgument(format!(
            "product already has id {}",
            product.id
        )));
    }
    Ok(())
}

pub(crate) fn ensure_assigned(product: &Product) -> ProductResult<()> {
    if !product.is_assigned() {
        return Err(crate::error::ProductError::InvalidArgument(
            "product has no id".to_string(),
        ));
    }
    Ok(())
}
