//! PostgreSQL implementation of InvoiceStore.
//!
//! The money-moving methods run a single transaction per call. Status
//! transitions use conditional updates (`WHERE status = 'P'`), so the
//! database decides races between concurrent settlements.

use crate::domain::foundation::{AccountId, Credits, InvoiceId, Timestamp};
use crate::domain::invoice::{Invoice, InvoiceError, InvoiceStatus};
use crate::ports::InvoiceStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// PostgreSQL implementation of the InvoiceStore port.
pub struct PostgresInvoiceStore {
    pool: PgPool,
}

impl PostgresInvoiceStore {
    /// Creates a new PostgresInvoiceStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reports why a conditional status update matched no row.
    async fn classify_failed_transition(
        &self,
        id: InvoiceId,
        target: InvoiceStatus,
    ) -> InvoiceError {
        let stored: Result<Option<(String,)>, sqlx::Error> =
            sqlx::query_as("SELECT status FROM lesson_invoices WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await;

        match stored {
            Ok(Some((code,))) => match InvoiceStatus::from_code(&code) {
                Some(from) => InvoiceError::InvalidTransition { from, to: target },
                None => InvoiceError::infrastructure(format!("Invalid status code: {}", code)),
            },
            Ok(None) => InvoiceError::NotFound(id),
            Err(e) => InvoiceError::infrastructure(e.to_string()),
        }
    }
}

async fn insert_invoice_row(
    tx: &mut Transaction<'_, Postgres>,
    invoice: &Invoice,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO lesson_invoices (
            id, mentor_id, mentee_id, amount, description, status,
            cancellation_reason, due_date, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(invoice.id.as_uuid())
    .bind(invoice.mentor_id.as_uuid())
    .bind(invoice.mentee_id.as_uuid())
    .bind(invoice.amount.amount())
    .bind(&invoice.description)
    .bind(invoice.status.code())
    .bind(&invoice.cancellation_reason)
    .bind(invoice.due_date.as_datetime())
    .bind(invoice.created_at.as_datetime())
    .bind(invoice.updated_at.as_datetime())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Database row representation of a lesson invoice.
#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: Uuid,
    mentor_id: Uuid,
    mentee_id: Uuid,
    amount: i64,
    description: Option<String>,
    status: String,
    cancellation_reason: Option<String>,
    due_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = InvoiceError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        let status = InvoiceStatus::from_code(&row.status).ok_or_else(|| {
            InvoiceError::infrastructure(format!("Invalid status code: {}", row.status))
        })?;
        let amount = Credits::positive(row.amount)
            .map_err(|e| InvoiceError::infrastructure(format!("Invalid amount: {}", e)))?;

        Ok(Invoice {
            id: InvoiceId::from_uuid(row.id),
            mentor_id: AccountId::from_uuid(row.mentor_id),
            mentee_id: AccountId::from_uuid(row.mentee_id),
            amount,
            description: row.description,
            status,
            cancellation_reason: row.cancellation_reason,
            due_date: Timestamp::from_datetime(row.due_date),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, mentor_id, mentee_id, amount, description, status,
           cancellation_reason, due_date, created_at, updated_at
    FROM lesson_invoices
"#;

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
    async fn insert_with_debit(&self, invoice: &Invoice) -> Result<Credits, InvoiceError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE accounts
            SET balance = balance - $2, updated_at = now()
            WHERE id = $1 AND balance >= $2
            RETURNING balance
            "#,
        )
        .bind(invoice.mentee_id.as_uuid())
        .bind(invoice.amount.amount())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        let balance = match row {
            Some((balance,)) => balance,
            None => {
                drop(tx);
                let stored: Option<(i64,)> =
                    sqlx::query_as("SELECT balance FROM accounts WHERE id = $1")
                        .bind(invoice.mentee_id.as_uuid())
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;
                return Err(match stored {
                    Some((available,)) => InvoiceError::InsufficientBalance {
                        account_id: invoice.mentee_id,
                        requested: invoice.amount.amount(),
                        available,
                    },
                    None => InvoiceError::AccountNotFound(invoice.mentee_id),
                });
            }
        };

        insert_invoice_row(&mut tx, invoice)
            .await
            .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        Credits::new(balance).map_err(|e| InvoiceError::infrastructure(e.to_string()))
    }

    async fn mark_paid_with_credit(&self, invoice: &Invoice) -> Result<Credits, InvoiceError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        let updated = sqlx::query(
            r#"
            UPDATE lesson_invoices
            SET status = 'A', updated_at = $2
            WHERE id = $1 AND status = 'P'
            "#,
        )
        .bind(invoice.id.as_uuid())
        .bind(invoice.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        if updated.rows_affected() == 0 {
            drop(tx);
            return Err(self
                .classify_failed_transition(invoice.id, InvoiceStatus::Paid)
                .await);
        }

        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE accounts
            SET balance = balance + $2, updated_at = now()
            WHERE id = $1
            RETURNING balance
            "#,
        )
        .bind(invoice.mentor_id.as_uuid())
        .bind(invoice.amount.amount())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        let (balance,) = row.ok_or(InvoiceError::AccountNotFound(invoice.mentor_id))?;

        tx.commit()
            .await
            .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        Credits::new(balance).map_err(|e| InvoiceError::infrastructure(e.to_string()))
    }

    async fn update_cancelled(&self, invoice: &Invoice) -> Result<(), InvoiceError> {
        let updated = sqlx::query(
            r#"
            UPDATE lesson_invoices
            SET status = 'C', cancellation_reason = $2, updated_at = $3
            WHERE id = $1 AND status = 'P'
            "#,
        )
        .bind(invoice.id.as_uuid())
        .bind(&invoice.cancellation_reason)
        .bind(invoice.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        if updated.rows_affected() == 0 {
            return Err(self
                .classify_failed_transition(invoice.id, InvoiceStatus::Cancelled)
                .await);
        }

        Ok(())
    }

    async fn find_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
        let row: Option<InvoiceRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        row.map(Invoice::try_from).transpose()
    }

    async fn list_by_mentor(&self, mentor_id: AccountId) -> Result<Vec<Invoice>, InvoiceError> {
        let rows: Vec<InvoiceRow> = sqlx::query_as(&format!(
            "{} WHERE mentor_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(mentor_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        rows.into_iter().map(Invoice::try_from).collect()
    }

    async fn list_by_mentee(&self, mentee_id: AccountId) -> Result<Vec<Invoice>, InvoiceError> {
        let rows: Vec<InvoiceRow> = sqlx::query_as(&format!(
            "{} WHERE mentee_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(mentee_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InvoiceError::infrastructure(e.to_string()))?;

        rows.into_iter().map(Invoice::try_from).collect()
    }
}
