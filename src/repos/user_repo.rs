/*
 * Responsibility
 * - users テーブルの登録と資格情報の照合
 * - パスワードハッシュは DB 側 (pgcrypto の crypt()) に任せ、このサービスでは扱わない
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::BoxFuture;
use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
}

/// User persistence used by registration and login.
pub trait UserStore: Send + Sync {
    /// `RepoError::Conflict` when the username or email is taken.
    fn create<'a>(&'a self, user: NewUser<'a>) -> BoxFuture<'a, Result<UserRow, RepoError>>;

    /// Returns:
    /// - `Ok(None)`        => unknown user
    /// - `Ok(Some(true))`  => password matches
    /// - `Ok(Some(false))` => wrong password
    fn verify<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<Option<bool>, RepoError>>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl UserStore for PgUserRepo {
    fn create<'a>(&'a self, user: NewUser<'a>) -> BoxFuture<'a, Result<UserRow, RepoError>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, UserRow>(
                r#"
                INSERT INTO users (username, hashed_password, full_name, email)
                VALUES ($1, crypt($2, gen_salt('bf')), $3, $4)
                RETURNING username, full_name, email, created_at
                "#,
            )
            .bind(user.username)
            .bind(user.password)
            .bind(user.full_name)
            .bind(user.email)
            .fetch_one(&self.db)
            .await
            .map_err(RepoError::from_sqlx)?;

            Ok(row)
        })
    }

    fn verify<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<Option<bool>, RepoError>> {
        Box::pin(async move {
            let matched = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT hashed_password = crypt($2, hashed_password)
                FROM users
                WHERE username = $1
                "#,
            )
            .bind(username)
            .bind(password)
            .fetch_optional(&self.db)
            .await?;

            Ok(matched)
        })
    }
}
