/*
 * Responsibility
 * - accounts / transfers 向け SQLx 操作
 * - AccountStore trait を通して handler に公開 (テストでは in-memory 実装に差し替え)
 * - 残高移動そのものは最小限 (transfer 行の記録 + 残高更新を 1 トランザクションで)
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::BoxFuture;
use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct TransferRow {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Account persistence as seen by handlers.
///
/// Ownership is not checked here; that is the handler's job.
pub trait AccountStore: Send + Sync {
    fn create<'a>(
        &'a self,
        owner: &'a str,
        currency: &'a str,
    ) -> BoxFuture<'a, Result<AccountRow, RepoError>>;

    fn get(&self, account_id: i64) -> BoxFuture<'_, Result<Option<AccountRow>, RepoError>>;

    fn list_by_owner<'a>(
        &'a self,
        owner: &'a str,
        limit: i64,
        offset: i64,
    ) -> BoxFuture<'a, Result<Vec<AccountRow>, RepoError>>;

    fn transfer(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> BoxFuture<'_, Result<TransferRow, RepoError>>;
}

#[derive(Clone, Debug)]
pub struct PgAccountRepo {
    db: PgPool,
}

impl PgAccountRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl AccountStore for PgAccountRepo {
    fn create<'a>(
        &'a self,
        owner: &'a str,
        currency: &'a str,
    ) -> BoxFuture<'a, Result<AccountRow, RepoError>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, AccountRow>(
                r#"
                INSERT INTO accounts (owner, balance, currency)
                VALUES ($1, 0, $2)
                RETURNING id, owner, balance, currency, created_at
                "#,
            )
            .bind(owner)
            .bind(currency)
            .fetch_one(&self.db)
            .await
            .map_err(RepoError::from_sqlx)?;

            Ok(row)
        })
    }

    fn get(&self, account_id: i64) -> BoxFuture<'_, Result<Option<AccountRow>, RepoError>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, AccountRow>(
                r#"
                SELECT id, owner, balance, currency, created_at
                FROM accounts
                WHERE id = $1
                "#,
            )
            .bind(account_id)
            .fetch_optional(&self.db)
            .await?;

            Ok(row)
        })
    }

    fn list_by_owner<'a>(
        &'a self,
        owner: &'a str,
        limit: i64,
        offset: i64,
    ) -> BoxFuture<'a, Result<Vec<AccountRow>, RepoError>> {
        Box::pin(async move {
            let rows = sqlx::query_as::<_, AccountRow>(
                r#"
                SELECT id, owner, balance, currency, created_at
                FROM accounts
                WHERE owner = $1
                ORDER BY id
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(owner)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

            Ok(rows)
        })
    }

    fn transfer(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> BoxFuture<'_, Result<TransferRow, RepoError>> {
        Box::pin(async move {
            let mut tx = self.db.begin().await?;

            let transfer = sqlx::query_as::<_, TransferRow>(
                r#"
                INSERT INTO transfers (from_account_id, to_account_id, amount)
                VALUES ($1, $2, $3)
                RETURNING id, from_account_id, to_account_id, amount, created_at
                "#,
            )
            .bind(from_account_id)
            .bind(to_account_id)
            .bind(amount)
            .fetch_one(&mut *tx)
            .await?;

            // Rows are locked in ascending id order.
            let mut updates = [(from_account_id, -amount), (to_account_id, amount)];
            updates.sort_by_key(|(id, _)| *id);
            for (account_id, delta) in updates {
                sqlx::query(
                    r#"
                    UPDATE accounts
                    SET balance = balance + $2
                    WHERE id = $1
                    "#,
                )
                .bind(account_id)
                .bind(delta)
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            Ok(transfer)
        })
    }
}
