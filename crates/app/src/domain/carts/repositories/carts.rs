//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::SavedRevision,
    domain::{
        carts::records::{CartOwner, CartRecord, CartSessionUuid, CartUuid},
        products::repository::{try_bind_amount, try_get_amount},
        users::records::UserUuid,
    },
};

const FIND_CART_SQL: &str = include_str!("../sql/find_cart.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const UPDATE_CART_SQL: &str = include_str!("../sql/update_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Cart header for `owner`, without items.
    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: CartOwner,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(FIND_CART_SQL)
            .bind(owner.user_uuid().map(UserUuid::into_uuid))
            .bind(owner.session_uuid().map(CartSessionUuid::into_uuid))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &CartRecord,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(CREATE_CART_SQL)
            .bind(cart.uuid.into_uuid())
            .bind(cart.owner.user_uuid().map(UserUuid::into_uuid))
            .bind(cart.owner.session_uuid().map(CartSessionUuid::into_uuid))
            .bind(SqlxTimestamp::from(cart.created_at))
            .fetch_one(&mut **tx)
            .await
    }

    /// Write the cart total if nobody else saved since `cart.version` was read.
    ///
    /// Returns `None` when the version no longer matches.
    pub(crate) async fn update_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &CartRecord,
    ) -> Result<Option<SavedRevision>, sqlx::Error> {
        query_as::<Postgres, SavedRevision>(UPDATE_CART_SQL)
            .bind(cart.uuid.into_uuid())
            .bind(cart.version)
            .bind(try_bind_amount(cart.total_price, "total_price")?)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let user_uuid: Option<uuid::Uuid> = row.try_get("user_uuid")?;
        let session_uuid: Option<uuid::Uuid> = row.try_get("session_uuid")?;

        let owner = match (user_uuid, session_uuid) {
            (Some(user), None) => CartOwner::User(UserUuid::from_uuid(user)),
            (None, Some(session)) => CartOwner::Session(CartSessionUuid::from_uuid(session)),
            _ => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "user_uuid".to_string(),
                    source: "cart must have exactly one owner".into(),
                });
            }
        };

        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            owner,
            items: Vec::new(),
            total_price: try_get_amount(row, "total_price")?,
            version: row.try_get("version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
