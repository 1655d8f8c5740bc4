//! Credit purchase events arriving from the payment provider.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Credits, PaymentEventId};

/// The credit bundles users can buy through checkout.
///
/// Each pack maps to a configured provider price id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditPack {
    Starter,
    Standard,
    Pro,
}

impl CreditPack {
    /// Credits granted by this pack.
    pub fn credits(&self) -> Credits {
        let amount = match self {
            CreditPack::Starter => 25,
            CreditPack::Standard => 200,
            CreditPack::Pro => 500,
        };
        Credits::new(amount).expect("pack sizes are positive constants")
    }

    /// Resolves a pack from a raw credit count, as carried in checkout
    /// requests and webhook metadata.
    pub fn from_credits(amount: i64) -> Option<Self> {
        match amount {
            25 => Some(CreditPack::Starter),
            200 => Some(CreditPack::Standard),
            500 => Some(CreditPack::Pro),
            _ => None,
        }
    }
}

/// A verified, parsed credit purchase event.
///
/// Produced by the webhook verifier after signature and payload checks;
/// the only thing the ingester does with it is resolve the account by
/// email and apply an idempotent ledger credit keyed by `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentEvent {
    /// Provider-assigned event id. The idempotency key.
    pub id: PaymentEventId,

    /// Buyer email, carried in the checkout session metadata.
    pub account_email: String,

    /// Credits purchased.
    pub credits: Credits,

    /// Provider-side creation time (unix seconds).
    pub created_at: i64,

    /// Whether the event originated from the provider's live environment.
    pub livemode: bool,
}

/// Outcome of verifying and parsing a webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentWebhookEvent {
    /// A completed checkout carrying a credit purchase.
    CheckoutCompleted(PaymentEvent),

    /// A valid, authenticated event of a type this system does not act on.
    Ignored { event_type: String },
}
