use crate::dto::v2::{ProductCreateDto, ProductReadDto, ProductUpdateDto};
use crate::models::Product;

pub fn to_read_dto(product: &Product) -> ProductReadDto {
    ProductReadDto {
        id: product.id,
        name: product.name.clone(),
        quantity: product.quantity,
        price: product.price,
        vendor_guid: product.vendor_guid.clone(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_dto_includes_vendor() {
        let product = Product::new("Keychron K8", 2, 89.0, "f534302c-7c1b-4954-9cb9-9576fd1c7dd8").with_id(4);
        let dto = to_read_dto(&product);
        assert_eq!(dto.id, 4);
        assert_eq!(dto.vendor_guid, "f534302c-7c1b-4954-9cb9-9576fd1c7dd8");
    }

    #[test]
    fn test_absent_members_map_to_defaults() {
        let product = from_create_dto(ProductCreateDto::default());
        assert_eq!(product, Product::default());
    }
}
