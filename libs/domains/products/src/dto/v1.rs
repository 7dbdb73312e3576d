use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product as returned by v1 (no vendor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = v1::ProductReadDto)]
pub struct ProductReadDto {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = v1::ProductCreateDto)]
pub struct ProductCreateDto {
    #[validate(required, length(max = 255))]
    #[schema(max_length = 255, example = "Keyboard X")]
    pub name: Option<String>,
    #[validate(required, range(min = 0))]
    #[schema(minimum = 0, example = 3)]
    pub quantity: Option<i32>,
    #[validate(required)]
    #[schema(example = 59.99)]
    pub price: Option<f64>,
    #[validate(required, length(max = 36))]
    #[schema(max_length = 36, example = "d406189b-01a1-404b-8147-cf9a81e1c283")]
    pub vendor_guid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = v1::ProductUpdateDto)]
pub struct ProductUpdateDto {
    #[validate(required, length(max = 255))]
    #[schema(max_length = 255)]
    pub name: Option<String>,
    #[validate(required, range(min = 0))]
    #[schema(minimum = 0)]
    pub quantity: Option<i32>,
    #[validate(required)]
    pub price: Option<f64>,
    #[validate(required, length(max = 36))]
    #[schema(max_length = 36)]
    pub vendor_guid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProductCreateDto {
        ProductCreateDto {
            name: Some("Keyboard X".to_string()),
            quantity: Some(3),
            price: Some(59.99),
            vendor_guid: Some("abc-123".to_string()),
        }
    }

    #[test]
    fn test_valid_create_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_missing_name_is_reported() {
        let dto = ProductCreateDto {
            name: None,
            ..valid()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_length_limits() {
        let dto = ProductCreateDto {
            name: Some("n".repeat(256)),
            vendor_guid: Some("g".repeat(37)),
            ..valid()
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("vendor_guid"));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let dto = ProductUpdateDto {
            name: Some("Keyboard X".to_string()),
            quantity: Some(-1),
            price: Some(1.0),
            vendor_guid: Some("abc".to_string()),
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.field_errors()["quantity"][0].code, "range");
    }

    #[test]
    fn test_read_dto_has_no_vendor() {
        let json = serde_json::to_value(ProductReadDto {
            id: 1,
            name: "Vortex Race 3".to_string(),
            quantity: 4,
            price: 150.0,
        })
        .unwrap();
        assert!(json.get("vendorGuid").is_none());
    }

    #[test]
    fn test_create_dto_reads_camel_case() {
        let dto: ProductCreateDto = serde_json::from_str(
            r#"{"name":"Keyboard X","quantity":3,"price":59.99,"vendorGuid":"abc-123"}"#,
        )
        .unwrap();
        assert_eq!(dto, valid());
    }
}
