//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{auth::models::TokenSubject, domain::users::records::UserUuid};

const FIND_TOKEN_SUBJECT_SQL: &str = include_str!("sql/find_token_subject.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_token_subject(
        &self,
        user: UserUuid,
    ) -> Result<Option<TokenSubject>, sqlx::Error> {
        query_as::<Postgres, TokenSubject>(FIND_TOKEN_SUBJECT_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TokenSubject {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            email: row.try_get("email")?,
            is_admin: row.try_get("is_admin")?,
            tokens_valid_after: row
                .try_get::<SqlxTimestamp, _>("tokens_valid_after")?
                .to_jiff(),
        })
    }
}
