//! PostgreSQL implementation of VerificationStore.
//!
//! Decision commits run one transaction covering the verification row,
//! the account row, and the category associations. The verification
//! status update is conditional on `status = 'PD'`, so a second decision
//! on the same request loses the race cleanly.

use crate::domain::account::{Account, CategoryAssociation, ServicePriceType};
use crate::domain::foundation::{AccountId, CategoryId, Timestamp, VerificationId};
use crate::domain::verification::{
    Verification, VerificationError, VerificationSnapshot, VerificationStatus,
};
use crate::ports::VerificationStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// PostgreSQL implementation of the VerificationStore port.
pub struct PostgresVerificationStore {
    pool: PgPool,
}

impl PostgresVerificationStore {
    /// Creates a new PostgresVerificationStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reports why a conditional status update matched no row.
    async fn classify_failed_transition(
        &self,
        id: VerificationId,
        target: VerificationStatus,
    ) -> VerificationError {
        let stored: Result<Option<(String,)>, sqlx::Error> =
            sqlx::query_as("SELECT status FROM verifications WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await;

        match stored {
            Ok(Some((code,))) => match VerificationStatus::from_code(&code) {
                Some(from) => VerificationError::InvalidTransition { from, to: target },
                None => {
                    VerificationError::infrastructure(format!("Invalid status code: {}", code))
                }
            },
            Ok(None) => VerificationError::NotFound(id),
            Err(e) => VerificationError::infrastructure(e.to_string()),
        }
    }
}

async fn update_account_row(
    tx: &mut Transaction<'_, Postgres>,
    account: &Account,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE accounts SET
            verification_status = $2,
            id_card_photo = $3,
            about_me_text = $4,
            about_me_video_link = $5,
            cv_link = $6,
            service_price = $7,
            service_price_type = $8,
            updated_at = $9
        WHERE id = $1
        "#,
    )
    .bind(account.id.as_uuid())
    .bind(account.verification_status.code())
    .bind(&account.profile.id_card_photo)
    .bind(&account.profile.about_me_text)
    .bind(&account.profile.about_me_video_link)
    .bind(&account.profile.cv_link)
    .bind(account.profile.service_price)
    .bind(account.profile.service_price_type.code())
    .bind(account.updated_at.as_datetime())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Database row representation of a verification request.
#[derive(Debug, sqlx::FromRow)]
struct VerificationRow {
    id: Uuid,
    account_id: Uuid,
    status: String,
    id_card_photo: String,
    about_me_text: Option<String>,
    about_me_video_link: Option<String>,
    cv_link: Option<String>,
    service_price: Option<f64>,
    service_price_type: String,
    categories: Vec<Uuid>,
    decline_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VerificationRow> for Verification {
    type Error = VerificationError;

    fn try_from(row: VerificationRow) -> Result<Self, Self::Error> {
        let status = VerificationStatus::from_code(&row.status).ok_or_else(|| {
            VerificationError::infrastructure(format!("Invalid status code: {}", row.status))
        })?;
        let service_price_type = ServicePriceType::from_code(&row.service_price_type)
            .ok_or_else(|| {
                VerificationError::infrastructure(format!(
                    "Invalid price type: {}",
                    row.service_price_type
                ))
            })?;

        Ok(Verification {
            id: VerificationId::from_uuid(row.id),
            account_id: AccountId::from_uuid(row.account_id),
            status,
            snapshot: VerificationSnapshot {
                id_card_photo: row.id_card_photo,
                about_me_text: row.about_me_text,
                about_me_video_link: row.about_me_video_link,
                cv_link: row.cv_link,
                service_price: row.service_price,
                service_price_type,
                categories: row.categories.into_iter().map(CategoryId::from_uuid).collect(),
            },
            decline_reason: row.decline_reason,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, account_id, status, id_card_photo, about_me_text,
           about_me_video_link, cv_link, service_price, service_price_type,
           categories, decline_reason, created_at, updated_at
    FROM verifications
"#;

#[async_trait]
impl VerificationStore for PostgresVerificationStore {
    async fn insert_pending(
        &self,
        verification: &Verification,
        account: &Account,
    ) -> Result<(), VerificationError> {
        let categories: Vec<Uuid> = verification
            .snapshot
            .categories
            .iter()
            .map(|c| *c.as_uuid())
            .collect();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO verifications (
                id, account_id, status, id_card_photo, about_me_text,
                about_me_video_link, cv_link, service_price, service_price_type,
                categories, decline_reason, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(verification.id.as_uuid())
        .bind(verification.account_id.as_uuid())
        .bind(verification.status.code())
        .bind(&verification.snapshot.id_card_photo)
        .bind(&verification.snapshot.about_me_text)
        .bind(&verification.snapshot.about_me_video_link)
        .bind(&verification.snapshot.cv_link)
        .bind(verification.snapshot.service_price)
        .bind(verification.snapshot.service_price_type.code())
        .bind(&categories)
        .bind(&verification.decline_reason)
        .bind(verification.created_at.as_datetime())
        .bind(verification.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        update_account_row(&mut tx, account)
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))
    }

    async fn find_by_id(
        &self,
        id: VerificationId,
    ) -> Result<Option<Verification>, VerificationError> {
        let row: Option<VerificationRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        row.map(Verification::try_from).transpose()
    }

    async fn list(
        &self,
        status: Option<VerificationStatus>,
    ) -> Result<Vec<Verification>, VerificationError> {
        let rows: Vec<VerificationRow> = match status {
            Some(status) => {
                sqlx::query_as(&format!(
                    "{} WHERE status = $1 ORDER BY created_at DESC",
                    SELECT_COLUMNS
                ))
                .bind(status.code())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_COLUMNS))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        rows.into_iter().map(Verification::try_from).collect()
    }

    async fn list_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Verification>, VerificationError> {
        let rows: Vec<VerificationRow> = sqlx::query_as(&format!(
            "{} WHERE account_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(account_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        rows.into_iter().map(Verification::try_from).collect()
    }

    async fn commit_approval(
        &self,
        verification: &Verification,
        account: &Account,
        providing: &[CategoryAssociation],
    ) -> Result<(), VerificationError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        let updated = sqlx::query(
            r#"
            UPDATE verifications
            SET status = 'AP', updated_at = $2
            WHERE id = $1 AND status = 'PD'
            "#,
        )
        .bind(verification.id.as_uuid())
        .bind(verification.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        if updated.rows_affected() == 0 {
            drop(tx);
            return Err(self
                .classify_failed_transition(verification.id, VerificationStatus::Approved)
                .await);
        }

        update_account_row(&mut tx, account)
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        sqlx::query("DELETE FROM category_associations WHERE account_id = $1 AND role = 'P'")
            .bind(account.id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        for association in providing {
            sqlx::query(
                r#"
                INSERT INTO category_associations (account_id, category_id, role)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(association.account_id.as_uuid())
            .bind(association.category_id.as_uuid())
            .bind(association.role.code())
            .execute(&mut *tx)
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))
    }

    async fn commit_decline(
        &self,
        verification: &Verification,
        account: &Account,
    ) -> Result<(), VerificationError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        let updated = sqlx::query(
            r#"
            UPDATE verifications
            SET status = 'DC', decline_reason = $2, updated_at = $3
            WHERE id = $1 AND status = 'PD'
            "#,
        )
        .bind(verification.id.as_uuid())
        .bind(&verification.decline_reason)
        .bind(verification.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        if updated.rows_affected() == 0 {
            drop(tx);
            return Err(self
                .classify_failed_transition(verification.id, VerificationStatus::Declined)
                .await);
        }

        update_account_row(&mut tx, account)
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))
    }
}
