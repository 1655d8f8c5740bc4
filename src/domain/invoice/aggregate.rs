//! Lesson invoice aggregate entity.
//!
//! An invoice prepays a lesson: the mentee is debited when the invoice is
//! created, and the mentor is credited when it is marked paid. The status
//! field is monotonic - once an invoice leaves `Pending` it never returns.
//!
//! # Invariants
//!
//! - `amount > 0`
//! - `status` transitions only `Pending -> Paid` or `Pending -> Cancelled`
//! - exactly one mentor credit per invoice reaching `Paid`

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, Credits, InvoiceId, Timestamp};

use super::{InvoiceError, InvoiceStatus};

/// Lesson invoice aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier for this invoice.
    pub id: InvoiceId,

    /// The mentor who will be credited on payment.
    pub mentor_id: AccountId,

    /// The mentee who was debited at creation.
    pub mentee_id: AccountId,

    /// Lesson cost in credits. Strictly positive.
    pub amount: Credits,

    /// Optional free-form lesson description.
    pub description: Option<String>,

    /// Current lifecycle state.
    pub status: InvoiceStatus,

    /// Reason supplied when the invoice was cancelled.
    pub cancellation_reason: Option<String>,

    /// When the lesson is due.
    pub due_date: Timestamp,

    /// When the invoice was created.
    pub created_at: Timestamp,

    /// When the invoice was last updated.
    pub updated_at: Timestamp,
}

impl Invoice {
    /// Creates a new `Pending` invoice.
    ///
    /// The mentee debit happens alongside the insert (see
    /// `InvoiceStore::insert_with_debit`); this constructor only builds
    /// the aggregate and validates the amount.
    pub fn create(
        id: InvoiceId,
        mentor_id: AccountId,
        mentee_id: AccountId,
        amount: Credits,
        due_date: Timestamp,
        description: Option<String>,
    ) -> Result<Self, InvoiceError> {
        if amount.is_zero() {
            return Err(InvoiceError::validation("amount", "must be positive"));
        }
        if mentor_id == mentee_id {
            return Err(InvoiceError::validation(
                "mentee_id",
                "mentor and mentee must be different accounts",
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id,
            mentor_id,
            mentee_id,
            amount,
            description,
            status: InvoiceStatus::Pending,
            cancellation_reason: None,
            due_date,
            created_at: now,
            updated_at: now,
        })
    }

    /// Transitions the invoice to `Paid`.
    ///
    /// Fails with `InvalidTransition` if the invoice is already terminal.
    /// The caller must credit the mentor in the same atomic unit that
    /// persists this transition.
    pub fn mark_paid(&mut self) -> Result<(), InvoiceError> {
        self.transition_to(InvoiceStatus::Paid)?;
        Ok(())
    }

    /// Transitions the invoice to `Cancelled`, recording the reason.
    ///
    /// No compensating credit is issued for the mentee's earlier debit;
    /// the refund path is an open product decision.
    pub fn cancel(&mut self, reason: Option<String>) -> Result<(), InvoiceError> {
        self.transition_to(InvoiceStatus::Cancelled)?;
        self.cancellation_reason = reason;
        Ok(())
    }

    fn transition_to(&mut self, target: InvoiceStatus) -> Result<(), InvoiceError> {
        if !self.status.can_transition_to(target) {
            return Err(InvoiceError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice() -> Invoice {
        Invoice::create(
            InvoiceId::new(),
            AccountId::new(),
            AccountId::new(),
            Credits::new(50).unwrap(),
            Timestamp::now().add_days(7),
            Some("Intro lesson".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn create_starts_pending() {
        let inv = invoice();
        assert_eq!(inv.status, InvoiceStatus::Pending);
        assert!(inv.cancellation_reason.is_none());
    }

    #[test]
    fn create_rejects_zero_amount() {
        let result = Invoice::create(
            InvoiceId::new(),
            AccountId::new(),
            AccountId::new(),
            Credits::ZERO,
            Timestamp::now(),
            None,
        );
        assert!(matches!(
            result,
            Err(InvoiceError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn create_rejects_self_invoicing() {
        let id = AccountId::new();
        let result = Invoice::create(
            InvoiceId::new(),
            id,
            id,
            Credits::new(10).unwrap(),
            Timestamp::now(),
            None,
        );
        assert!(matches!(
            result,
            Err(InvoiceError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn mark_paid_from_pending_succeeds() {
        let mut inv = invoice();
        inv.mark_paid().unwrap();
        assert_eq!(inv.status, InvoiceStatus::Paid);
    }

    #[test]
    fn mark_paid_twice_fails() {
        let mut inv = invoice();
        inv.mark_paid().unwrap();

        let result = inv.mark_paid();

        assert_eq!(
            result,
            Err(InvoiceError::InvalidTransition {
                from: InvoiceStatus::Paid,
                to: InvoiceStatus::Paid,
            })
        );
    }

    #[test]
    fn cancel_records_reason() {
        let mut inv = invoice();
        inv.cancel(Some("mentee unavailable".to_string())).unwrap();
        assert_eq!(inv.status, InvoiceStatus::Cancelled);
        assert_eq!(
            inv.cancellation_reason.as_deref(),
            Some("mentee unavailable")
        );
    }

    #[test]
    fn cancelled_invoice_cannot_be_paid() {
        let mut inv = invoice();
        inv.cancel(None).unwrap();

        let result = inv.mark_paid();

        assert_eq!(
            result,
            Err(InvoiceError::InvalidTransition {
                from: InvoiceStatus::Cancelled,
                to: InvoiceStatus::Paid,
            })
        );
    }

    #[test]
    fn paid_invoice_cannot_be_cancelled() {
        let mut inv = invoice();
        inv.mark_paid().unwrap();

        let result = inv.cancel(Some("too late".to_string()));

        assert!(matches!(
            result,
            Err(InvoiceError::InvalidTransition { .. })
        ));
        assert!(inv.cancellation_reason.is_none());
    }
}
