//! Cart Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::records::{CartItemRecord, CartItemUuid, CartUuid},
    products::{
        records::ProductUuid,
        repository::{try_bind_amount, try_get_amount},
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("../sql/delete_cart_items.sql");
const INSERT_CART_ITEMS_SQL: &str = include_str!("../sql/insert_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lines of `cart` in the order they were added.
    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Overwrite the stored lines of `cart` with `items`, keeping their order.
    pub(crate) async fn replace_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        items: &[CartItemRecord],
    ) -> Result<(), sqlx::Error> {
        query(DELETE_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?;

        if items.is_empty() {
            return Ok(());
        }

        let mut uuids = Vec::with_capacity(items.len());
        let mut products = Vec::with_capacity(items.len());
        let mut quantities = Vec::with_capacity(items.len());
        let mut subtotals = Vec::with_capacity(items.len());
        let mut positions = Vec::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            uuids.push(item.uuid.into_uuid());
            products.push(item.product_uuid.into_uuid());
            quantities.push(i32::try_from(item.quantity).map_err(|e| {
                sqlx::Error::Encode(format!("quantity: {e}").into())
            })?);
            subtotals.push(try_bind_amount(item.subtotal, "subtotal")?);
            positions.push(i32::try_from(position).map_err(|e| {
                sqlx::Error::Encode(format!("position: {e}").into())
            })?);
        }

        query(INSERT_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .bind(uuids)
            .bind(products)
            .bind(quantities)
            .bind(subtotals)
            .bind(positions)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;

        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            product_image_url: row.try_get("product_image_url")?,
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            subtotal: try_get_amount(row, "subtotal")?,
        })
    }
}
