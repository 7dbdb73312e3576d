use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product as returned by v2, including the vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = v2::ProductReadDto)]
pub struct ProductReadDto {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    pub vendor_guid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = v2::ProductCreateDto)]
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
#[schema(as = v2::ProductUpdateDto)]
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
