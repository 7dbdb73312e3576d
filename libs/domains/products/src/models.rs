use serde::{Deserialize, Serialize};

/// A catalog product as stored.
///
/// `id` is assigned by the store; a product that has not been stored yet
/// carries [`Product::UNASSIGNED_ID`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    pub vendor_guid: String,
}

impl Product {
    pub const UNASSIGNED_ID: i32 = 0;

    pub fn new(name: impl Into<String>, quantity: i32, price: f64, vendor_guid: impl Into<String>) -> Self {
        Self {
            id: Self::UNASSIGNED_ID,
            name: name.into(),
            quantity,
            price,
            vendor_guid: vendor_guid.into(),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn is_assigned(&self) -> bool {
        self.id != Self::UNASSIGNED_ID
    }
}

/// The four rows the seed migration inserts (ids 1-4).
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new("Vortex Race 3", 4, 150.0, "d406189b-01a1-404b-8147-cf9a81e1c283").with_id(1),
        Product::new("Varmilo VA88M", 0, 180.0, "29077cea-6bdc-4dc4-b441-b325fc9a2797").with_id(2),
        Product::new("Ducky One 2 Mini", 1, 139.0, "8b43de00-475a-4db2-be34-71a3d1ba40b1").with_id(3),
        Product::new("Keychron K8", 2, 89.0, "f534302c-7c1b-4954-9cb9-9576fd1c7dd8").with_id(4),
    ]
}

/// Read-only rows served by the fixture store (ids 0-3).
pub fn fixture_products() -> Vec<Product> {
    vec![
        Product::new("Mock Vortex Race 3", 4, 150.0, "d406189b-01a1-404b-8147-cf9a81e1c283").with_id(0),
        Product::new("Mock Varmilo VA88M", 0, 180.0, "29077cea-6bdc-4dc4-b441-b325fc9a2797").with_id(1),
        Product::new("Mock Ducky One 2 Mini", 1, 139.0, "8b43de00-475a-4db2-be34-71a3d1ba40b1").with_id(2),
        Product::new("Mock Keychron K8", 2, 89.0, "f534302c-7c1b-4954-9cb9-9576fd1c7dd8").with_id(3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_is_unassigned() {
        let product = Product::new("Keyboard X", 3, 59.99, "abc-123");
        assert_eq!(product.id, Product::UNASSIGNED_ID);
        assert!(!product.is_assigned());
        assert!(product.with_id(5).is_assigned());
    }

    #[test]
    fn test_seed_ids_are_unique_and_assigned() {
        let seed = seed_products();
        let mut ids: Vec<i32> = seed.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(seed.iter().all(|p| p.vendor_guid.len() == 36));
    }
}
