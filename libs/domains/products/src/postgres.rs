use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use database::postgres::check_health;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryOrder,
    TransactionTrait,
};
use tracing::info;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::Product,
    repository::{ProductRepository, ProductStore, ensure_assigned, ensure_unassigned},
};

/// Relational store backed by a sea-orm connection pool.
#[derive(Clone)]
pub struct PgProductStore {
    db: DatabaseConnection,
    timeout: Duration,
}

impl PgProductStore {
    /// `timeout` bounds every individual database call.
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    type Session = PgProductSession;

    fn session(&self) -> Self::Session {
        PgProductSession {
            db: self.db.clone(),
            txn: None,
            timeout: self.timeout,
        }
    }

    async fn ping(&self) -> ProductResult<()> {
        tokio::time::timeout(self.timeout, check_health(&self.db))
            .await
            .map_err(|_| ProductError::Timeout(self.timeout))?
            .map_err(|e| ProductError::Store(e.to_string()))
    }
}

/// Session holding at most one transaction, opened by the first write.
///
/// Dropping the session drops the transaction, which rolls it back.
pub struct PgProductSession {
    db: DatabaseConnection,
    txn: Option<DatabaseTransaction>,
    timeout: Duration,
}

impl PgProductSession {
    async fn transaction(&mut self) -> ProductResult<&mut DatabaseTransaction> {
        let txn = match self.txn.take() {
            Some(txn) => txn,
            None => with_timeout(self.timeout, self.db.begin()).await?,
        };
        Ok(self.txn.insert(txn))
    }
}

#[async_trait]
impl ProductRepository for PgProductSession {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let query = entity::Entity::find().order_by_asc(entity::Column::Id);
        let models = match &self.txn {
            Some(txn) => with_timeout(self.timeout, query.all(txn)).await?,
            None => with_timeout(self.timeout, query.all(&self.db)).await?,
        };

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let query = entity::Entity::find_by_id(id);
        let model = match &self.txn {
            Some(txn) => with_timeout(self.timeout, query.one(txn)).await?,
            None => with_timeout(self.timeout, query.one(&self.db)).await?,
        };

        Ok(model.map(Product::from))
    }

    async fn create(&mut self, product: Product) -> ProductResult<Product> {
        ensure_unassigned(&product)?;
        let timeout = self.timeout;
        let txn = self.transaction().await?;

        let model = with_timeout(timeout, entity::ActiveModel::for_insert(product).insert(&*txn)).await?;
        info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&mut self, product: Product) -> ProductResult<()> {
        ensure_assigned(&product)?;
        let id = product.id;
        let timeout = self.timeout;
        let txn = self.transaction().await?;

        let result = tokio::time::timeout(timeout, entity::ActiveModel::for_update(product).update(&*txn))
            .await
            .map_err(|_| ProductError::Timeout(timeout))?;
        match result {
            Ok(_) => {
                info!(product_id = id, "Updated product");
                Ok(())
            }
            Err(DbErr::RecordNotUpdated) => Err(ProductError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&mut self, product: Product) -> ProductResult<()> {
        ensure_assigned(&product)?;
        let timeout = self.timeout;
        let txn = self.transaction().await?;

        let result = with_timeout(timeout, entity::Entity::delete_by_id(product.id).exec(&*txn)).await?;
        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(product.id));
        }
        info!(product_id = product.id, "Deleted product");
        Ok(())
    }

    async fn persist(&mut self) -> ProductResult<()> {
        if let Some(txn) = self.txn.take() {
            with_timeout(self.timeout, txn.commit()).await?;
        }
        Ok(())
    }
}

async fn with_timeout<T>(limit: Duration, fut: impl Future<Output = Result<T, DbErr>>) -> ProductResult<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(ProductError::from),
        Err(_) => Err(ProductError::Timeout(limit)),
    }
}
