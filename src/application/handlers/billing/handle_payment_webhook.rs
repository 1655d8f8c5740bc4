//! HandlePaymentWebhookHandler - Command handler for inbound payment
//! provider webhooks.
//!
//! Signature verification happens before anything else. A verified
//! checkout event resolves the buyer by email and applies an idempotent
//! ledger credit keyed by the provider's event id, so a redelivered
//! webhook never credits twice.

use std::sync::Arc;

use crate::domain::billing::{PaymentWebhookEvent, WebhookError};
use crate::domain::foundation::{AccountId, Credits, DomainError, ErrorCode};
use crate::domain::ledger::{CreditOutcome, LedgerError};
use crate::ports::{AccountStore, CheckoutGateway, CreditLedger};

/// Command to process a raw webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw request body, exactly as signed by the provider.
    pub payload: Vec<u8>,
    /// Signature header value.
    pub signature: String,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlePaymentWebhookResult {
    /// Credits were applied to the buyer's balance.
    CreditsApplied {
        account_id: AccountId,
        credits: Credits,
        new_balance: Credits,
    },
    /// The event id was seen before; nothing changed.
    AlreadyProcessed,
    /// A valid event of a type this system does not act on.
    Ignored { event_type: String },
}

/// Handler for payment provider webhooks.
pub struct HandlePaymentWebhookHandler {
    gateway: Arc<dyn CheckoutGateway>,
    account_store: Arc<dyn AccountStore>,
    ledger: Arc<dyn CreditLedger>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        gateway: Arc<dyn CheckoutGateway>,
        account_store: Arc<dyn AccountStore>,
        ledger: Arc<dyn CreditLedger>,
    ) -> Self {
        Self {
            gateway,
            account_store,
            ledger,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, DomainError> {
        let event = self
            .gateway
            .verify_webhook(&cmd.payload, &cmd.signature)
            .map_err(map_webhook_error)?;

        let event = match event {
            PaymentWebhookEvent::CheckoutCompleted(event) => event,
            PaymentWebhookEvent::Ignored { event_type } => {
                tracing::debug!(event_type = %event_type, "Ignoring webhook event");
                return Ok(HandlePaymentWebhookResult::Ignored { event_type });
            }
        };

        let account = self
            .account_store
            .find_by_email(&event.account_email)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::AccountNotFound,
                    format!("No account for {}", event.account_email),
                )
            })?;

        let outcome = self
            .ledger
            .credit_once(account.id, event.credits, &event.id)
            .await
            .map_err(map_ledger_error)?;

        match outcome {
            CreditOutcome::Applied(new_balance) => {
                tracing::info!(
                    account_id = %account.id,
                    event_id = %event.id,
                    credits = event.credits.amount(),
                    new_balance = new_balance.amount(),
                    "Credit purchase applied"
                );
                Ok(HandlePaymentWebhookResult::CreditsApplied {
                    account_id: account.id,
                    credits: event.credits,
                    new_balance,
                })
            }
            CreditOutcome::AlreadyApplied => {
                tracing::info!(
                    account_id = %account.id,
                    event_id = %event.id,
                    "Duplicate webhook delivery, credit already applied"
                );
                Ok(HandlePaymentWebhookResult::AlreadyProcessed)
            }
        }
    }
}

fn map_webhook_error(err: WebhookError) -> DomainError {
    let code = match err {
        WebhookError::InvalidSignature
        | WebhookError::TimestampOutOfRange
        | WebhookError::InvalidTimestamp => ErrorCode::InvalidSignature,
        WebhookError::ParseError(_) | WebhookError::MissingMetadata(_) => {
            ErrorCode::ValidationFailed
        }
    };
    DomainError::new(code, err.to_string())
}

fn map_ledger_error(err: LedgerError) -> DomainError {
    let code = match err {
        LedgerError::AccountNotFound(_) => ErrorCode::AccountNotFound,
        LedgerError::Infrastructure(_) => ErrorCode::DatabaseError,
        _ => ErrorCode::InternalError,
    };
    DomainError::new(code, err.to_string())
}
