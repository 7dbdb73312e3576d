//! Product Service - Business logic layer

use std::sync::Arc;

use tracing::{info, instrument};
use validator::Validate;

use crate::contract::ApiContract;
use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::patch::PatchDocument;
use crate::repository::{ProductRepository, ProductStore};

/// Product service providing the catalog operations for every API version.
///
/// Each call opens its own store session; every write is committed by a
/// single `persist` before the call returns.
pub struct ProductService<S: ProductStore> {
    store: Arc<S>,
}

impl<S: ProductStore> ProductService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    #[instrument(skip(self), fields(version = %C::VERSION))]
    pub async fn list<C: ApiContract>(&self) -> ProductResult<Vec<C::Read>> {
        let products = self.store.session().list().await?;
        Ok(products.iter().map(C::to_read).collect())
    }

    #[instrument(skip(self), fields(version = %C::VERSION))]
    pub async fn get<C: ApiContract>(&self, id: i32) -> ProductResult<C::Read> {
        let product = self
            .store
            .session()
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;
        Ok(C::to_read(&product))
    }

    /// Validates, stores and returns the new product with its id.
    #[instrument(skip(self, dto), fields(version = %C::VERSION))]
    pub async fn create<C: ApiContract>(&self, dto: C::Create) -> ProductResult<C::Read> {
        dto.validate()?;

        let mut session = self.store.session();
        let created = session.create(C::from_create(dto)).await?;
        session.persist().await?;

        info!(product_id = created.id, "Product created");
        Ok(C::to_read(&created))
    }

    #[instrument(skip(self, dto), fields(version = %C::VERSION))]
    pub async fn update<C: ApiContract>(&self, id: i32, dto: C::Update) -> ProductResult<()> {
        let mut session = self.store.session();
        let mut product = session.get_by_id(id).await?.ok_or(ProductError::NotFound(id))?;

        dto.validate()?;
        C::apply_update(dto, &mut product);
        session.update(product).await?;
        session.persist().await?;

        info!(product_id = id, "Product updated");
        Ok(())
    }

    /// Applies `patch` to the product's update form and writes the result.
    ///
    /// Nothing is written unless the patch applies and the patched form
    /// validates.
    #[instrument(skip(self, patch), fields(version = %C::VERSION, operations = patch.operations().len()))]
    pub async fn patch<C: ApiContract>(&self, id: i32, patch: PatchDocument) -> ProductResult<()> {
        let mut session = self.store.session();
        let mut product = session.get_by_id(id).await?.ok_or(ProductError::NotFound(id))?;

        let patched = patch_update_form::<C>(&product, &patch)?;
        C::apply_update(patched, &mut product);
        session.update(product).await?;
        session.persist().await?;

        info!(product_id = id, "Product patched");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> ProductResult<()> {
        let mut session = self.store.session();
        let product = session.get_by_id(id).await?.ok_or(ProductError::NotFound(id))?;

        session.delete(product).await?;
        session.persist().await?;

        info!(product_id = id, "Product deleted");
        Ok(())
    }

    pub async fn ping(&self) -> ProductResult<()> {
        self.store.ping().await
    }
}

fn patch_update_form<C: ApiContract>(product: &Product, patch: &PatchDocument) -> ProductResult<C::Update> {
    let document = serde_json::to_value(C::to_update(product)).map_err(|e| ProductError::Internal(e.to_string()))?;
    let patched = patch.apply(&document)?;

    let dto: C::Update = serde_json::from_value(patched).map_err(|e| ProductError::UnprocessablePatch {
        message: e.to_string(),
        errors: None,
    })?;
    dto.validate().map_err(|errors| ProductError::UnprocessablePatch {
        message: "Patched product failed validation".to_string(),
        errors: Some(errors),
    })?;

    Ok(dto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{V1, V2};
    use crate::dto::{v1, v2};
    use crate::models::seed_products;
    use crate::patch::{PatchError, PatchOperation};
    use crate::repository::{MockProductRepository, MockProductStore};
    use mockall::predicate::*;
    use serde_json::json;

    fn seed(id: i32) -> Product {
        seed_products().into_iter().find(|p| p.id == id).unwrap()
    }

    fn store_with(session: MockProductRepository) -> MockProductStore {
        let mut store = MockProductStore::new();
        let mut session = Some(session);
        store.expect_session().returning(move || session.take().unwrap_or_default());
        store
    }

    fn valid_create() -> v2::ProductCreateDto {
        v2::ProductCreateDto {
            name: Some("Keyboard X".to_string()),
            quantity: Some(3),
            price: Some(59.99),
            vendor_guid: Some("abc-123".to_string()),
        }
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mut session = MockProductRepository::new();
        session.expect_get_by_id().with(eq(99)).times(1).returning(|_| Ok(None));

        let service = ProductService::new(store_with(session));
        let result = service.get::<V1>(99).await;

        assert!(matches!(result, Err(ProductError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_list_maps_per_version() {
        let mut session = MockProductRepository::new();
        session.expect_list().times(1).returning(|| Ok(seed_products()));

        let service = ProductService::new(store_with(session));
        let products = service.list::<V2>().await.unwrap();

        assert_eq!(products.len(), 4);
        assert_eq!(products[0].vendor_guid, "d406189b-01a1-404b-8147-cf9a81e1c283");
    }

    #[tokio::test]
    async fn test_create_persists_once() {
        let mut session = MockProductRepository::new();
        session
            .expect_create()
            .withf(|p| p.name == "Keyboard X" && p.id == Product::UNASSIGNED_ID)
            .times(1)
            .returning(|p| Ok(p.with_id(5)));
        session.expect_persist().times(1).returning(|| Ok(()));

        let service = ProductService::new(store_with(session));
        let created = service.create::<V2>(valid_create()).await.unwrap();

        assert_eq!(created.id, 5);
        assert_eq!(created.name, "Keyboard X");
        assert_eq!(created.vendor_guid, "abc-123");
    }

    #[tokio::test]
    async fn test_invalid_create_never_opens_a_session() {
        let mut store = MockProductStore::new();
        store.expect_session().times(0);

        let service = ProductService::new(store);
        let dto = v2::ProductCreateDto {
            name: None,
            ..valid_create()
        };

        assert!(matches!(service.create::<V2>(dto).await, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_writes_mapped_fields() {
        let mut session = MockProductRepository::new();
        session.expect_get_by_id().with(eq(2)).returning(|id| Ok(Some(seed(id))));
        session
            .expect_update()
            .withf(|p| p.id == 2 && p.quantity == 7 && p.vendor_guid == "abc-123")
            .times(1)
            .returning(|_| Ok(()));
        session.expect_persist().times(1).returning(|| Ok(()));

        let service = ProductService::new(store_with(session));
        let dto = v1::ProductUpdateDto {
            name: Some("Varmilo VA88M".to_string()),
            quantity: Some(7),
            price: Some(180.0),
            vendor_guid: Some("abc-123".to_string()),
        };

        service.update::<V1>(2, dto).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_of_missing_product_skips_validation() {
        let mut session = MockProductRepository::new();
        session.expect_get_by_id().returning(|_| Ok(None));
        session.expect_update().times(0);

        let service = ProductService::new(store_with(session));
        let result = service.update::<V1>(42, v1::ProductUpdateDto::default()).await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_patch_replaces_single_member() {
        let mut session = MockProductRepository::new();
        session.expect_get_by_id().returning(|id| Ok(Some(seed(id))));
        session
            .expect_update()
            .withf(|p| p.id == 1 && p.quantity == 10 && p.name == "Vortex Race 3")
            .times(1)
            .returning(|_| Ok(()));
        session.expect_persist().times(1).returning(|| Ok(()));

        let service = ProductService::new(store_with(session));
        let patch = PatchDocument::new(vec![PatchOperation::Replace {
            path: "/quantity".to_string(),
            value: json!(10),
        }]);

        service.patch::<V1>(1, patch).await.unwrap();
    }

    #[tokio::test]
    async fn test_structural_patch_failure_writes_nothing() {
        let mut session = MockProductRepository::new();
        session.expect_get_by_id().returning(|id| Ok(Some(seed(id))));
        session.expect_update().times(0);
        session.expect_persist().times(0);

        let service = ProductService::new(store_with(session));
        let patch = PatchDocument::new(vec![PatchOperation::Add {
            path: "/colour".to_string(),
            value: json!("red"),
        }]);

        let result = service.patch::<V1>(1, patch).await;
        assert!(matches!(result, Err(ProductError::InvalidPatch(PatchError::UnknownMember(_)))));
    }

    #[tokio::test]
    async fn test_semantic_patch_failure_is_unprocessable() {
        let mut session = MockProductRepository::new();
        session.expect_get_by_id().returning(|id| Ok(Some(seed(id))));
        session.expect_update().times(0);

        let service = ProductService::new(store_with(session));

        let removed = PatchDocument::new(vec![PatchOperation::Remove {
            path: "/name".to_string(),
        }]);
        match service.patch::<V2>(1, removed).await {
            Err(ProductError::UnprocessablePatch { errors: Some(errors), .. }) => {
                assert!(errors.field_errors().contains_key("name"));
            }
            other => panic!("expected unprocessable patch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_patch_with_wrong_type_is_unprocessable() {
        let mut session = MockProductRepository::new();
        session.expect_get_by_id().returning(|id| Ok(Some(seed(id))));

        let service = ProductService::new(store_with(session));
        let patch = PatchDocument::new(vec![PatchOperation::Replace {
            path: "/quantity".to_string(),
            value: json!("many"),
        }]);

        let result = service.patch::<V1>(1, patch).await;
        assert!(matches!(result, Err(ProductError::UnprocessablePatch { errors: None, .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut session = MockProductRepository::new();
        session.expect_get_by_id().returning(|_| Ok(None));
        session.expect_delete().times(0);

        let service = ProductService::new(store_with(session));
        assert!(matches!(service.delete(9).await, Err(ProductError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut session = MockProductRepository::new();
        session.expect_get_by_id().returning(|id| Ok(Some(seed(id))));
        session.expect_delete().returning(|_| Ok(()));
        session
            .expect_persist()
            .returning(|| Err(ProductError::Store("connection reset".to_string())));

        let service = ProductService::new(store_with(session));
        assert!(matches!(service.delete(3).await, Err(ProductError::Store(_))));
    }
}
