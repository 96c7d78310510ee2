//! # Account Repository
//!
//! Database access for admin and user accounts.
//!
//! Each role has an identity table (`admins` / `users`) and a username table
//! (`admin_usernames` / `user_usernames`) carrying the UNIQUE constraint. An
//! account is always written to both inside one transaction.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::{AccountForCreate, Role};
//! # use lib_core::model::store::{AccountRepository, connect_in_memory};
//! # async fn example(new: AccountForCreate) -> Result<(), sqlx::Error> {
//! let pool = connect_in_memory().await?;
//!
//! AccountRepository::create(&pool, Role::Admin, &new).await?;
//! let found = AccountRepository::find_by_username(&pool, Role::Admin, &new.username).await?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use sqlx::{query_as, query_scalar, FromRow};
use uuid::Uuid;

use super::DbPool;
use crate::model::account::{Account, AccountForCreate, Role};

/// Table names backing one role.
struct AccountTables {
    accounts: &'static str,
    usernames: &'static str,
    owner_column: &'static str,
}

fn tables(role: Role) -> AccountTables {
    match role {
        Role::Admin => AccountTables {
            accounts: "admins",
            usernames: "admin_usernames",
            owner_column: "admin_id",
        },
        Role::User => AccountTables {
            accounts: "users",
            usernames: "user_usernames",
            owner_column: "user_id",
        },
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self, role: Role) -> Account {
        Account {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password,
            role,
            created_at: self.created_at,
        }
    }
}

/// Account repository for database operations.
pub struct AccountRepository;

impl AccountRepository {
    /// Whether `username` is already registered under `role`.
    pub async fn username_taken(
        pool: &DbPool,
        role: Role,
        username: &str,
    ) -> Result<bool, sqlx::Error> {
        let t = tables(role);
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE username = ?)",
            t.usernames
        );

        query_scalar::<_, bool>(&sql)
            .bind(username)
            .fetch_one(pool)
            .await
    }

    /// Find an account of `role` by username.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that username in this role
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_username(
        pool: &DbPool,
        role: Role,
        username: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let t = tables(role);
        let sql = format!(
            "SELECT a.id, n.username, a.email, a.password, a.created_at \
             FROM {accounts} a \
             INNER JOIN {usernames} n ON n.{owner} = a.id \
             WHERE n.username = ?",
            accounts = t.accounts,
            usernames = t.usernames,
            owner = t.owner_column,
        );

        let row = query_as::<_, AccountRow>(&sql)
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|row| row.into_account(role)))
    }

    /// Insert the identity row and the username row in one transaction.
    ///
    /// A taken username surfaces as a unique-violation database error and
    /// leaves nothing behind.
    pub async fn create(
        pool: &DbPool,
        role: Role,
        account: &AccountForCreate,
    ) -> Result<Account, sqlx::Error> {
        let t = tables(role);
        let insert_account = format!(
            "INSERT INTO {} (id, email, password, created_at) VALUES (?, ?, ?, ?)",
            t.accounts
        );
        let insert_username = format!(
            "INSERT INTO {} ({}, username) VALUES (?, ?)",
            t.usernames, t.owner_column
        );

        let mut tx = pool.begin().await?;

        sqlx::query(&insert_account)
            .bind(account.id)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.created_at)
            .execute(&mut *tx)
            .await?;

        sqlx::query(&insert_username)
            .bind(account.id)
            .bind(&account.username)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Account {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            role,
            created_at: account.created_at,
        })
    }
}
