//! Integration tests for the lesson invoice workflow.
//!
//! Exercises the full handler flow against in-memory stores that mirror
//! the transactional guarantees of the Postgres adapters:
//! 1. Issuing an invoice debits the mentee atomically with the insert
//! 2. Settling credits the mentor exactly once
//! 3. Concurrent issues cannot overdraw a balance

use std::sync::Arc;

use mentorhub::application::handlers::invoice::{
    CreateInvoiceCommand, CreateInvoiceHandler, UpdateInvoiceStatusCommand,
    UpdateInvoiceStatusHandler,
};
use mentorhub::domain::foundation::Timestamp;
use mentorhub::domain::invoice::{InvoiceError, InvoiceStatus};

mod support;
use support::{account_with_balance, InMemoryAccountStore, InMemoryInvoiceStore};

struct Fixture {
    accounts: Arc<InMemoryAccountStore>,
    invoices: Arc<InMemoryInvoiceStore>,
    create: CreateInvoiceHandler,
    update: UpdateInvoiceStatusHandler,
}

fn fixture(mentee_balance: i64) -> (Fixture, mentorhub::domain::account::Account, mentorhub::domain::account::Account) {
    let mentor = account_with_balance("mentor@example.com", 0);
    let mentee = account_with_balance("mentee@example.com", mentee_balance);
    let accounts = Arc::new(InMemoryAccountStore::with_accounts(vec![
        mentor.clone(),
        mentee.clone(),
    ]));
    let invoices = Arc::new(InMemoryInvoiceStore::new(accounts.clone()));
    let create = CreateInvoiceHandler::new(invoices.clone(), accounts.clone());
    let update = UpdateInvoiceStatusHandler::new(invoices.clone());
    (
        Fixture {
            accounts,
            invoices,
            create,
            update,
        },
        mentor,
        mentee,
    )
}

fn create_command(
    mentor: &mentorhub::domain::account::Account,
    mentee: &mentorhub::domain::account::Account,
    amount: i64,
) -> CreateInvoiceCommand {
    CreateInvoiceCommand {
        mentor_id: mentor.id,
        mentee_id: mentee.id,
        amount,
        due_date: Timestamp::now(),
        description: Some("Algebra lesson".to_string()),
    }
}

#[tokio::test]
async fn issue_then_pay_moves_credits_from_mentee_to_mentor() {
    let (fx, mentor, mentee) = fixture(100);

    let created = fx
        .create
        .handle(create_command(&mentor, &mentee, 60))
        .await
        .unwrap();

    assert_eq!(created.mentee_balance.amount(), 40);
    assert_eq!(created.invoice.status, InvoiceStatus::Pending);
    assert_eq!(fx.accounts.balance_of(mentee.id), 40);
    assert_eq!(fx.accounts.balance_of(mentor.id), 0);

    let paid = fx
        .update
        .handle(UpdateInvoiceStatusCommand {
            invoice_id: created.invoice.id,
            status: InvoiceStatus::Paid,
            cancellation_reason: None,
        })
        .await
        .unwrap();

    assert_eq!(paid.invoice.status, InvoiceStatus::Paid);
    assert_eq!(paid.mentor_balance.unwrap().amount(), 60);
    assert_eq!(fx.accounts.balance_of(mentor.id), 60);
    assert_eq!(fx.accounts.balance_of(mentee.id), 40);
}

#[tokio::test]
async fn cancelling_moves_no_credits_and_records_the_reason() {
    let (fx, mentor, mentee) = fixture(100);

    let created = fx
        .create
        .handle(create_command(&mentor, &mentee, 30))
        .await
        .unwrap();

    let cancelled = fx
        .update
        .handle(UpdateInvoiceStatusCommand {
            invoice_id: created.invoice.id,
            status: InvoiceStatus::Cancelled,
            cancellation_reason: Some("Mentee rescheduled".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(cancelled.invoice.status, InvoiceStatus::Cancelled);
    assert_eq!(
        cancelled.invoice.cancellation_reason.as_deref(),
        Some("Mentee rescheduled")
    );
    assert!(cancelled.mentor_balance.is_none());
    // The debit from issue stands; cancellation is not a refund.
    assert_eq!(fx.accounts.balance_of(mentee.id), 70);
    assert_eq!(fx.accounts.balance_of(mentor.id), 0);
}

#[tokio::test]
async fn paying_twice_credits_the_mentor_exactly_once() {
    let (fx, mentor, mentee) = fixture(100);

    let created = fx
        .create
        .handle(create_command(&mentor, &mentee, 50))
        .await
        .unwrap();

    let pay = UpdateInvoiceStatusCommand {
        invoice_id: created.invoice.id,
        status: InvoiceStatus::Paid,
        cancellation_reason: None,
    };

    fx.update.handle(pay.clone()).await.unwrap();
    let second = fx.update.handle(pay).await;

    assert!(matches!(
        second,
        Err(InvoiceError::InvalidTransition {
            from: InvoiceStatus::Paid,
            to: InvoiceStatus::Paid,
        })
    ));
    assert_eq!(fx.accounts.balance_of(mentor.id), 50);
}

#[tokio::test]
async fn concurrent_issues_cannot_overdraw_the_mentee() {
    let (fx, mentor, mentee) = fixture(100);

    let (first, second) = tokio::join!(
        fx.create.handle(create_command(&mentor, &mentee, 80)),
        fx.create.handle(create_command(&mentor, &mentee, 80)),
    );

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one issue may win the balance");

    let failure = if first.is_err() { first } else { second };
    assert!(matches!(
        failure,
        Err(InvoiceError::InsufficientBalance { .. })
    ));

    // Only the winning invoice exists, and its debit stands.
    assert_eq!(fx.invoices.invoices().len(), 1);
    assert_eq!(fx.accounts.balance_of(mentee.id), 20);
}

#[tokio::test]
async fn failed_debit_leaves_no_invoice_behind() {
    let (fx, mentor, mentee) = fixture(10);

    let result = fx.create.handle(create_command(&mentor, &mentee, 60)).await;

    assert!(matches!(
        result,
        Err(InvoiceError::InsufficientBalance { .. })
    ));
    assert!(fx.invoices.invoices().is_empty());
    assert_eq!(fx.accounts.balance_of(mentee.id), 10);
}
