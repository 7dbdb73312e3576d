use crate::dto::v1::{ProductCreateDto, ProductReadDto, ProductUpdateDto};
use crate::models::Product;

pub fn to_read_dto(product: &Product) -> ProductReadDto {
    ProductReadDto {
        id: product.id,
        name: product.name.clone(),
        quantity: product.quantity,
        price: product.price,
    }
}

pub fn from_create_dto(dto: ProductCreateDto) -> Product {
    Product::new(
        dto.name.unwrap_or_default(),
        dto.quantity.unwrap_or_default(),
        dto.price.unwrap_or_default(),
        dto.vendor_guid.unwrap_or_default(),
    )
}

/// Overwrites every mapped field of `product`; `id` is left untouched.
pub fn apply_update_dto(dto: ProductUpdateDto, product: &mut Product) {
    product.name = dto.name.unwrap_or_default();
    product.quantity = dto.quantity.unwrap_or_default();
    product.price = dto.price.unwrap_or_default();
    product.vendor_guid = dto.vendor_guid.unwrap_or_default();
}

pub fn to_update_dto(product: &Product) -> ProductUpdateDto {
    ProductUpdateDto {
        name: Some(product.name.clone()),
        quantity: Some(product.quantity),
        price: Some(product.price),
        vendor_guid: Some(product.vendor_guid.clone()),
    }
}
