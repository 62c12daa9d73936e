//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductFields, ProductFilter, ProductUpdate},
        errors::ProductsServiceError,
        records::{ActivationChange, ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let uuid = product.uuid;
        let fields = ProductFields::try_from(product)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, uuid, &fields)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let fields = ProductFields::try_from(update)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &fields)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn set_product_active(
        &self,
        product: ProductUuid,
        is_active: bool,
    ) -> Result<ActivationChange, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_product(&mut tx, product).await?;

        if current.is_active == is_active {
            return Ok(ActivationChange::Unchanged(current));
        }

        let updated = self
            .repository
            .set_product_active(&mut tx, product, is_active)
            .await?;

        tx.commit().await?;

        Ok(ActivationChange::Changed(updated))
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List products matching `filter`, oldest first.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product with the given details.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replace a product's details.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Archive (`false`) or activate (`true`) a product. Idempotent.
    async fn set_product_active(
        &self,
        product: ProductUuid,
        is_active: bool,
    ) -> Result<ActivationChange, ProductsServiceError>;
}
