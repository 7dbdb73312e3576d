//! Binds each API version to its own DTOs and mapping functions.
//!
//! Handlers and the service are generic over [`ApiContract`], so a v1 DTO can
//! never be mapped with v2 functions.

use serde::{Serialize, de::DeserializeOwned};
use strum::{Display, EnumString};
use validator::Validate;

use crate::dto::{v1, v2};
use crate::mapping;
use crate::models::Product;

/// Supported API versions.
///
/// Parses `1`, `1.0`, `2` and `2.0`; displays as `1.0` / `2.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
pub enum ApiVersion {
    #[default]
    #[strum(to_string = "1.0", serialize = "1")]
    V1,
    #[strum(to_string = "2.0", serialize = "2")]
    V2,
}

impl ApiVersion {
    /// Value of the `api-supported-versions` header.
    pub const SUPPORTED: &'static str = "1.0, 2.0";

    /// Path segment of the versioned routes.
    pub fn segment(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

pub trait ApiContract: Send + Sync + 'static {
    const VERSION: ApiVersion;

    type Read: Serialize + Send;
    type Create: DeserializeOwned + Validate + Send;
    type Update: Serialize + DeserializeOwned + Validate + Send;

    fn to_read(product: &Product) -> Self::Read;
    fn from_create(dto: Self::Create) -> Product;
    fn apply_update(dto: Self::Update, product: &mut Product);
    fn to_update(product: &Product) -> Self::Update;
}

/// Version 1.0 (no vendor in reads).
pub struct V1;

/// Version 2.0.
pub struct V2;

impl ApiContract for V1 {
    const VERSION: ApiVersion = ApiVersion::V1;

    type Read = v1::ProductReadDto;
    type Create = v1::ProductCreateDto;
    type Update = v1::ProductUpdateDto;

    fn to_read(product: &Product) -> Self::Read {
        mapping::v1::to_read_dto(product)
    }

    fn from_create(dto: Self::Create) -> Product {
        mapping::v1::from_create_dto(dto)
    }

    fn apply_update(dto: Self::Update, product: &mut Product) {
        mapping::v1::apply_update_dto(dto, product)
    }

    fn to_update(product: &Product) -> Self::Update {
        mapping::v1::to_update_dto(product)
    }
}

impl ApiContract for V2 {
    const VERSION: ApiVersion = ApiVersion::V2;

    type Read = v2::ProductReadDto;
    type Create = v2::ProductCreateDto;
    type Update = v2::ProductUpdateDto;

    fn to_read(product: &Product) -> Self::Read {
        mapping::v2::to_read_dto(product)
    }

    fn from_create(dto: Self::Create) -> Product {
        mapping::v2::from_create_dto(dto)
    }

    fn apply_update(dto: Self::Update, product: &mut Product) {
        mapping::v2::apply_update_dto(dto, product)
    }

    fn to_update(product: &Product) -> Self::Update {
        mapping::v2::to_update_dto(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_version_parsing() {
        assert_eq!(ApiVersion::from_str("1").unwrap(), ApiVersion::V1);
        assert_eq!(ApiVersion::from_str("1.0").unwrap(), ApiVersion::V1);
        assert_eq!(ApiVersion::from_str("2").unwrap(), ApiVersion::V2);
        assert_eq!(ApiVersion::from_str("2.0").unwrap(), ApiVersion::V2);
        assert!(ApiVersion::from_str("3.0").is_err());
    }

    #[test]
    fn test_version_display_and_segment() {
        assert_eq!(ApiVersion::V2.to_string(), "2.0");
        assert_eq!(ApiVersion::V1.segment(), "v1");
        assert_eq!(ApiVersion::default(), ApiVersion::V1);
    }
}
