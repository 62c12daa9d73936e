//! Products Data

use url::Url;

use crate::domain::products::{errors::ProductsServiceError, records::ProductUuid};

/// Image used for products created or updated without one.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://dn721803.ca.archive.org/0/items/placeholder-image//placeholder-image.jpg";

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: Option<String>,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: Option<String>,
}

/// Catalog query. Every criterion is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,

    /// Case-insensitive substring of the description.
    pub description: Option<String>,

    /// Inclusive lower price bound.
    pub min_price: Option<u64>,

    /// Inclusive upper price bound.
    pub max_price: Option<u64>,

    pub active_only: bool,
}

impl ProductFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name_contains(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description_contains(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn price_between(min_price: u64, max_price: u64) -> Self {
        Self {
            min_price: Some(min_price),
            max_price: Some(max_price),
            ..Self::default()
        }
    }
}

/// Validated column values shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

impl ProductFields {
    pub(crate) fn validate(
        name: String,
        description: String,
        price: u64,
        image_url: Option<String>,
    ) -> Result<Self, ProductsServiceError> {
        if name.trim().is_empty() || description.trim().is_empty() {
            return Err(ProductsServiceError::Invalid(
                "Name and description are required",
            ));
        }

        if i64::try_from(price).is_err() {
            return Err(ProductsServiceError::Invalid("Price is out of range"));
        }

        Ok(Self {
            name,
            description,
            price,
            image_url: resolve_image_url(image_url)?,
        })
    }
}

impl TryFrom<NewProduct> for ProductFields {
    type Error = ProductsServiceError;

    fn try_from(product: NewProduct) -> Result<Self, Self::Error> {
        Self::validate(
            product.name,
            product.description,
            product.price,
            product.image_url,
        )
    }
}

impl TryFrom<ProductUpdate> for ProductFields {
    type Error = ProductsServiceError;

    fn try_from(update: ProductUpdate) -> Result<Self, Self::Error> {
        Self::validate(
            update.name,
            update.description,
            update.price,
            update.image_url,
        )
    }
}

/// Blank or missing image URLs fall back to the placeholder; anything else
/// must be an absolute http(s) URL with a host.
fn resolve_image_url(image_url: Option<String>) -> Result<String, ProductsServiceError> {
    let Some(image_url) = image_url.filter(|url| !url.trim().is_empty()) else {
        return Ok(PLACEHOLDER_IMAGE_URL.to_string());
    };

    let parsed = Url::parse(image_url.trim())
        .map_err(|_parse_error| ProductsServiceError::Invalid("Invalid image URL"))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ProductsServiceError::Invalid("Invalid image URL"));
    }

    Ok(parsed.into())
}

/// Escape `LIKE` wildcards so user input matches literally.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);

    pattern.push('%');

    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(ch);
    }

    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(image_url: Option<&str>) -> Result<ProductFields, ProductsServiceError> {
        ProductFields::validate(
            "Mug".to_string(),
            "A mug".to_string(),
            10_00,
            image_url.map(ToString::to_string),
        )
    }

    #[test]
    fn missing_image_uses_placeholder() -> Result<(), ProductsServiceError> {
        assert_eq!(fields(None)?.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(fields(Some("  "))?.image_url, PLACEHOLDER_IMAGE_URL);

        Ok(())
    }

    #[test]
    fn valid_image_url_is_kept() -> Result<(), ProductsServiceError> {
        let fields = fields(Some("https://cdn.example.com/mug.png"))?;

        assert_eq!(fields.image_url, "https://cdn.example.com/mug.png");

        Ok(())
    }

    #[test]
    fn malformed_image_url_is_rejected() {
        for url in ["not a url", "ftp://example.com/x.png", "mailto:a@b.c", "/relative.png"] {
            let result = fields(Some(url));

            assert!(
                matches!(result, Err(ProductsServiceError::Invalid("Invalid image URL"))),
                "expected {url} to be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = ProductFields::validate(" ".to_string(), "d".to_string(), 1, None);

        assert!(
            matches!(result, Err(ProductsServiceError::Invalid(_))),
            "expected Invalid, got {result:?}"
        );
    }

    #[test]
    fn price_beyond_storage_range_is_rejected() {
        let result = ProductFields::validate("n".to_string(), "d".to_string(), u64::MAX, None);

        assert!(
            matches!(result, Err(ProductsServiceError::Invalid(_))),
            "expected Invalid, got {result:?}"
        );
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("mug"), "%mug%");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
