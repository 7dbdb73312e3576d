use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, seed_products};
use crate::repository::{ProductRepository, ProductStore, ensure_assigned, ensure_unassigned};

struct Shared {
    rows: RwLock<BTreeMap<i32, Product>>,
    next_id: AtomicI32,
}

/// Mutable store held in process memory.
///
/// Sessions stage their writes and apply them in one step under the write
/// lock when persisted, so concurrent readers see either none or all of a
/// session's changes.
#[derive(Clone)]
pub struct InMemoryProductStore {
    shared: Arc<Shared>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    /// Store pre-filled with the four seed products.
    pub fn seeded() -> Self {
        Self::with_products(seed_products())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let rows = products.into_iter().map(|p| (p.id, p)).collect();

        Self {
            shared: Arc::new(Shared {
                rows: RwLock::new(rows),
                next_id: AtomicI32::new(next_id),
            }),
        }
    }

    /// Committed rows, ordered by id.
    pub async fn snapshot(&self) -> Vec<Product> {
        self.shared.rows.read().await.values().cloned().collect()
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    type Session = InMemorySession;

    fn session(&self) -> Self::Session {
        InMemorySession {
            shared: Arc::clone(&self.shared),
            pending: Vec::new(),
        }
    }

    async fn ping(&self) -> ProductResult<()> {
        Ok(())
    }
}

enum Pending {
    Insert(Product),
    Update(Product),
    Remove(i32),
}

pub struct InMemorySession {
    shared: Arc<Shared>,
    pending: Vec<Pending>,
}

impl InMemorySession {
    /// Committed rows with this session's staged writes laid over them.
    fn overlay(&self, mut rows: BTreeMap<i32, Product>) -> BTreeMap<i32, Product> {
        for change in &self.pending {
            match change {
                Pending::Insert(p) | Pending::Update(p) => {
                    rows.insert(p.id, p.clone());
                }
                Pending::Remove(id) => {
                    rows.remove(id);
                }
            }
        }
        rows
    }
}

#[async_trait]
impl ProductRepository for InMemorySession {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let rows = self.shared.rows.read().await.clone();
        Ok(self.overlay(rows).into_values().collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let rows = self.shared.rows.read().await.clone();
        Ok(self.overlay(rows).remove(&id))
    }

    async fn create(&mut self, product: Product) -> ProductResult<Product> {
        ensure_unassigned(&product)?;
        let id = self.shared.next_id.fetch_add(1, Ordering::SeqCst);
        let product = product.with_id(id);
        self.pending.push(Pending::Insert(product.clone()));
        Ok(product)
    }

    async fn update(&mut self, product: Product) -> ProductResult<()> {
        ensure_assigned(&product)?;
        self.pending.push(Pending::Update(product));
        Ok(())
    }

    async fn delete(&mut self, product: Product) -> ProductResult<()> {
        ensure_assigned(&product)?;
        self.pending.push(Pending::Remove(product.id));
        Ok(())
    }

    async fn persist(&mut self) -> ProductResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let mut rows = self.shared.rows.write().await;
        let mut next = rows.clone();
        for change in &self.pending {
            match change {
                Pending::Insert(p) => {
                    next.insert(p.id, p.clone());
                }
                Pending::Update(p) => match next.get_mut(&p.id) {
                    Some(row) => *row = p.clone(),
                    None => return Err(ProductError::NotFound(p.id)),
                },
                Pending::Remove(id) => {
                    if next.remove(id).is_none() {
                        return Err(ProductError::NotFound(*id));
                    }
                }
            }
        }
        *rows = next;

        info!(changes = self.pending.len(), "Persisted product changes");
        self.pending.clear();
        Ok(())
    }
}
