//! Product Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    /// Unit price in minor currency units.
    pub price: u64,
    pub is_active: bool,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of an archive/activate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationChange {
    /// The active flag was flipped.
    Changed(ProductRecord),

    /// The product was already in the requested state.
    Unchanged(ProductRecord),
}

impl ActivationChange {
    #[must_use]
    pub fn product(&self) -> &ProductRecord {
        match self {
            Self::Changed(product) | Self::Unchanged(product) => product,
        }
    }

    #[must_use]
    pub fn into_product(self) -> ProductRecord {
        match self {
            Self::Changed(product) | Self::Unchanged(product) => product,
        }
    }
}
