//! Lesson invoice status state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a lesson invoice.
///
/// `Pending` is the only non-terminal state. Both `Paid` and `Cancelled`
/// are terminal: once an invoice leaves `Pending` no further transition is
/// allowed. (The original system only guarded against re-transitioning
/// `Paid` invoices; `Cancelled` is enforced as terminal here as well.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    /// Single-letter storage code (matches the persisted schema).
    pub fn code(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "P",
            InvoiceStatus::Paid => "A",
            InvoiceStatus::Cancelled => "C",
        }
    }

    /// Parses a storage code back into a status.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(InvoiceStatus::Pending),
            "A" => Some(InvoiceStatus::Paid),
            "C" => Some(InvoiceStatus::Cancelled),
            _ => None,
        }
    }

    /// Returns true if no further transitions are allowed from this state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InvoiceStatus::Pending)
    }

    /// Checks whether a transition to `target` is allowed.
    pub fn can_transition_to(&self, target: InvoiceStatus) -> bool {
        matches!(
            (self, target),
            (InvoiceStatus::Pending, InvoiceStatus::Paid)
                | (InvoiceStatus::Pending, InvoiceStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}
