use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use crate::models::Product;

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub name: String,
    pub quantity: i32,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "String(StringLen::N(36))")]
    pub vendor_guid: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            quantity: model.quantity,
            price: model.price,
            vendor_guid: model.vendor_guid,
        }
    }
}

impl ActiveModel {
    /// Insert model; the database assigns the id.
    pub fn for_insert(product: Product) -> Self {
        Self {
            id: NotSet,
            name: Set(product.name),
            quantity: Set(product.quantity),
            price: Set(product.price),
            vendor_guid: Set(product.vendor_guid),
        }
    }

    /// Update model writing every column of an existing row.
    pub fn for_update(product: Product) -> Self {
        Self {
            id: Unchanged(product.id),
            name: Set(product.name),
            quantity: Set(product.quantity),
            price: Set(product.price),
            vendor_guid: Set(product.vendor_guid),
        }
    }
}
