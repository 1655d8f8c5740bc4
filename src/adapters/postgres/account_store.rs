//! PostgreSQL implementation of AccountStore.

use crate::domain::account::{Account, AccountVerificationStatus, MentorProfile, ServicePriceType};
use crate::domain::foundation::{AccountId, CategoryId, Credits, DomainError, ErrorCode, Timestamp};
use crate::ports::AccountStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the AccountStore port.
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    /// Creates a new PostgresAccountStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an account.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    name: String,
    balance: i64,
    verification_status: String,
    id_card_photo: Option<String>,
    about_me_text: Option<String>,
    about_me_video_link: Option<String>,
    cv_link: Option<String>,
    service_price: Option<f64>,
    service_price_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let verification_status = AccountVerificationStatus::from_code(&row.verification_status)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid verification status: {}", row.verification_status),
                )
            })?;
        let service_price_type =
            ServicePriceType::from_code(&row.service_price_type).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid price type: {}", row.service_price_type),
                )
            })?;
        let balance = Credits::new(row.balance).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid balance: {}", e))
        })?;

        Ok(Account {
            id: AccountId::from_uuid(row.id),
            email: row.email,
            name: row.name,
            balance,
            verification_status,
            profile: MentorProfile {
                id_card_photo: row.id_card_photo,
                about_me_text: row.about_me_text,
                about_me_video_link: row.about_me_video_link,
                cv_link: row.cv_link,
                service_price: row.service_price,
                service_price_type,
            },
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, name, balance, verification_status,
           id_card_photo, about_me_text, about_me_video_link, cv_link,
           service_price, service_price_type, created_at, updated_at
    FROM accounts
"#;

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, email, name, balance, verification_status,
                id_card_photo, about_me_text, about_me_video_link, cv_link,
                service_price, service_price_type, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.email)
        .bind(&account.name)
        .bind(account.balance.amount())
        .bind(account.verification_status.code())
        .bind(&account.profile.id_card_photo)
        .bind(&account.profile.about_me_text)
        .bind(&account.profile.about_me_video_link)
        .bind(&account.profile.cv_link)
        .bind(account.profile.service_price)
        .bind(account.profile.service_price_type.code())
        .bind(account.created_at.as_datetime())
        .bind(account.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("accounts_email_key") {
                    return DomainError::validation("email", "Email is already taken");
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save account: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        // The balance column belongs to the ledger and is never written here.
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                name = $2,
                verification_status = $3,
                id_card_photo = $4,
                about_me_text = $5,
                about_me_video_link = $6,
                cv_link = $7,
                service_price = $8,
                service_price_type = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.name)
        .bind(account.verification_status.code())
        .bind(&account.profile.id_card_photo)
        .bind(&account.profile.about_me_text)
        .bind(&account.profile.about_me_video_link)
        .bind(&account.profile.cv_link)
        .bind(account.profile.service_price)
        .bind(account.profile.service_price_type.code())
        .bind(account.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update account: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AccountNotFound,
                format!("Account {} not found", account.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find account: {}", e),
                    )
                })?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE email = $1", SELECT_COLUMNS))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find account by email: {}", e),
                    )
                })?;

        row.map(Account::try_from).transpose()
    }

    async fn providing_categories(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<CategoryId>, DomainError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT category_id FROM category_associations
            WHERE account_id = $1 AND role = 'P'
            ORDER BY category_id
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list categories: {}", e),
            )
        })?;

        Ok(rows
            .into_iter()
            .map(|(id,)| CategoryId::from_uuid(id))
            .collect())
    }
}
