//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            records::{CartOwner, CartRecord},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::{
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    async fn load_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: CartOwner,
    ) -> Result<Option<CartRecord>, CartsServiceError> {
        let Some(mut cart) = self.carts_repository.find_cart(tx, owner).await? else {
            return Ok(None);
        };

        cart.items = self
            .items_repository
            .get_cart_items(tx, cart.uuid)
            .await?;

        Ok(Some(cart))
    }

    async fn load_or_create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: CartOwner,
    ) -> Result<CartRecord, CartsServiceError> {
        if let Some(cart) = self.load_cart(tx, owner).await? {
            return Ok(cart);
        }

        let cart = CartRecord::empty(owner, Timestamp::now());

        debug!(cart = %cart.uuid, "creating cart");

        self.carts_repository
            .create_cart(tx, &cart)
            .await
            .map_err(|error| match CartsServiceError::from(error) {
                CartsServiceError::AlreadyExists => CartsServiceError::Conflict,
                other => other,
            })
    }

    async fn require_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: CartOwner,
    ) -> Result<CartRecord, CartsServiceError> {
        self.load_cart(tx, owner)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    async fn load_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, CartsServiceError> {
        self.products_repository
            .get_product(tx, product)
            .await
            .map_err(CartsServiceError::from_product_lookup)
    }

    /// Persist `cart` against the version it was read at.
    async fn save_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &mut CartRecord,
    ) -> Result<(), CartsServiceError> {
        let revision = self
            .carts_repository
            .update_cart(tx, cart)
            .await?
            .ok_or(CartsServiceError::Conflict)?;

        self.items_repository
            .replace_cart_items(tx, cart.uuid, &cart.items)
            .await?;

        cart.version = revision.version;
        cart.updated_at = revision.updated_at;

        Ok(())
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, owner: CartOwner) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.require_cart(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(
        &self,
        owner: CartOwner,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.load_product(&mut tx, product).await?;
        let mut cart = self.load_or_create_cart(&mut tx, owner).await?;

        cart.add_line(&product, quantity)?;

        self.save_cart(&mut tx, &mut cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn set_item_quantity(
        &self,
        owner: CartOwner,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let product = self.load_product(&mut tx, product).await?;
        let mut cart = self.require_cart(&mut tx, owner).await?;

        cart.set_line_quantity(&product, quantity)?;

        self.save_cart(&mut tx, &mut cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        owner: CartOwner,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self.require_cart(&mut tx, owner).await?;

        cart.remove_line(product)?;

        self.save_cart(&mut tx, &mut cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, owner: CartOwner) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self.require_cart(&mut tx, owner).await?;

        cart.clear();

        self.save_cart(&mut tx, &mut cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart_at_version(
        &self,
        owner: CartOwner,
        version: i64,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self.require_cart(&mut tx, owner).await?;

        if cart.version != version {
            return Err(CartsServiceError::Conflict);
        }

        cart.clear();

        self.save_cart(&mut tx, &mut cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn count_items(&self, owner: CartOwner) -> Result<u64, CartsServiceError> {
        let cart = self.get_cart(owner).await?;

        Ok(cart.item_count())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the cart belonging to `owner`.
    async fn get_cart(&self, owner: CartOwner) -> Result<CartRecord, CartsServiceError>;

    /// Add `quantity` of a product, creating the cart on first use.
    async fn add_item(
        &self,
        owner: CartOwner,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Replace the quantity of an existing line.
    async fn set_item_quantity(
        &self,
        owner: CartOwner,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove a product's line.
    async fn remove_item(
        &self,
        owner: CartOwner,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove every line and zero the total.
    async fn clear_cart(&self, owner: CartOwner) -> Result<CartRecord, CartsServiceError>;

    /// Empty the cart only if it is still at `version`.
    ///
    /// Fails with `Conflict` when the cart changed after it was read, leaving
    /// every line in place.
    async fn clear_cart_at_version(
        &self,
        owner: CartOwner,
        version: i64,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Sum of line quantities.
    async fn count_items(&self, owner: CartOwner) -> Result<u64, CartsServiceError>;
}
