/*
 * Responsibility
 * - 永続化層 (外部コラボレータ) への窓口
 * - handler は trait (AccountStore / UserStore) だけに依存する
 */
pub mod account_repo;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod user_repo;

use std::{future::Future, pin::Pin};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
