//! PostgreSQL implementation of CreditLedger.
//!
//! Debits rely on a conditional `UPDATE ... WHERE balance >= amount`:
//! Postgres serializes the row update, so two racing debits that would
//! jointly overdraw the account cannot both match the condition. The
//! idempotent credit inserts the dedup marker and moves the balance in
//! one transaction.

use crate::domain::foundation::{AccountId, Credits, PaymentEventId};
use crate::domain::ledger::{CreditOutcome, LedgerError};
use crate::ports::CreditLedger;
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of the CreditLedger port.
pub struct PostgresCreditLedger {
    pool: PgPool,
}

impl PostgresCreditLedger {
    /// Creates a new PostgresCreditLedger with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Distinguishes a missing account from an uncovered debit after a
    /// conditional update matched no row.
    async fn classify_failed_debit(
        &self,
        account_id: AccountId,
        requested: Credits,
    ) -> LedgerError {
        let balance: Result<Option<(i64,)>, sqlx::Error> =
            sqlx::query_as("SELECT balance FROM accounts WHERE id = $1")
                .bind(account_id.as_uuid())
                .fetch_optional(&self.pool)
                .await;

        match balance {
            Ok(Some((available,))) => LedgerError::InsufficientBalance {
                account_id,
                requested: requested.amount(),
                available,
            },
            Ok(None) => LedgerError::AccountNotFound(account_id),
            Err(e) => LedgerError::infrastructure(e.to_string()),
        }
    }
}

#[async_trait]
impl CreditLedger for PostgresCreditLedger {
    async fn debit(&self, account_id: AccountId, amount: Credits) -> Result<Credits, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::NonPositiveAmount);
        }

        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE accounts
            SET balance = balance - $2, updated_at = now()
            WHERE id = $1 AND balance >= $2
            RETURNING balance
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(amount.amount())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::infrastructure(e.to_string()))?;

        match row {
            Some((balance,)) => Credits::new(balance)
                .map_err(|e| LedgerError::infrastructure(e.to_string())),
            None => Err(self.classify_failed_debit(account_id, amount).await),
        }
    }

    async fn credit(&self, account_id: AccountId, amount: Credits) -> Result<Credits, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::NonPositiveAmount);
        }

        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE accounts
            SET balance = balance + $2, updated_at = now()
            WHERE id = $1
            RETURNING balance
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(amount.amount())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::infrastructure(e.to_string()))?;

        match row {
            Some((balance,)) => Credits::new(balance)
                .map_err(|e| LedgerError::infrastructure(e.to_string())),
            None => Err(LedgerError::AccountNotFound(account_id)),
        }
    }

    async fn credit_once(
        &self,
        account_id: AccountId,
        amount: Credits,
        event_id: &PaymentEventId,
    ) -> Result<CreditOutcome, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::NonPositiveAmount);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| LedgerError::infrastructure(e.to_string()))?;

        let marker = sqlx::query(
            r#"
            INSERT INTO processed_payment_events (event_id, account_id, credits, processed_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (event_id) DO NOTHING
            "#,
        )
        .bind(event_id.as_str())
        .bind(account_id.as_uuid())
        .bind(amount.amount())
        .execute(&mut *tx)
        .await
        .map_err(|e| LedgerError::infrastructure(e.to_string()))?;

        if marker.rows_affected() == 0 {
            // Seen before; nothing to commit.
            return Ok(CreditOutcome::AlreadyApplied);
        }

        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE accounts
            SET balance = balance + $2, updated_at = now()
            WHERE id = $1
            RETURNING balance
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(amount.amount())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| LedgerError::infrastructure(e.to_string()))?;

        let (balance,) = row.ok_or(LedgerError::AccountNotFound(account_id))?;

        tx.commit()
            .await
            .map_err(|e| LedgerError::infrastructure(e.to_string()))?;

        let balance =
            Credits::new(balance).map_err(|e| LedgerError::infrastructure(e.to_string()))?;
        Ok(CreditOutcome::Applied(balance))
    }
}
