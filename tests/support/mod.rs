//! In-memory port implementations shared by the integration tests.
//!
//! Each store mirrors the transactional guarantees of the Postgres
//! adapters: conditional status transitions, atomic debit-or-nothing
//! inserts, and event-id deduplication.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use mentorhub::domain::account::{Account, CategoryAssociation, ServiceRole};
use mentorhub::domain::billing::{PaymentWebhookEvent, PaymentWebhookVerifier, WebhookError};
use mentorhub::domain::foundation::{
    AccountId, CategoryId, Credits, DomainError, ErrorCode, InvoiceId, PaymentEventId,
    VerificationId,
};
use mentorhub::domain::invoice::{Invoice, InvoiceError, InvoiceStatus};
use mentorhub::domain::ledger::{CreditOutcome, LedgerError};
use mentorhub::domain::verification::{Verification, VerificationError, VerificationStatus};
use mentorhub::ports::{
    AccountStore, BlobStore, CheckoutGateway, CheckoutSession, CreateCheckoutRequest,
    CreditLedger, InvoiceStore, Notification, Notifier, VerificationStore,
};

/// Builds an account preloaded with a balance.
pub fn account_with_balance(email: &str, balance: i64) -> Account {
    let name = email.split('@').next().unwrap_or("user").to_string();
    let mut account = Account::new(AccountId::new(), email, name).unwrap();
    if balance > 0 {
        account.credit(Credits::new(balance).unwrap()).unwrap();
    }
    account
}

/// Signs a webhook payload the way the provider does: `t=<ts>,v1=<hex hmac>`.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &str) -> String {
    let signed_payload = format!("{}.{}", timestamp, payload);
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(signed_payload.as_bytes());
    let hex: String = mac
        .finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();
    format!("t={},v1={}", timestamp, hex)
}

pub struct InMemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
    associations: Mutex<Vec<CategoryAssociation>>,
}

impl InMemoryAccountStore {
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            associations: Mutex::new(Vec::new()),
        }
    }

    pub fn balance_of(&self, id: AccountId) -> i64 {
        self.get(id).map(|a| a.balance.amount()).unwrap_or(-1)
    }

    pub fn get(&self, id: AccountId) -> Option<Account> {
        self.accounts.lock().unwrap().iter().find(|a| a.id == id).cloned()
    }

    pub fn seed_associations(&self, associations: Vec<CategoryAssociation>) {
        self.associations.lock().unwrap().extend(associations);
    }

    pub fn categories_of(&self, account_id: AccountId, role: ServiceRole) -> Vec<CategoryId> {
        self.associations
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.account_id == account_id && a.role == role)
            .map(|a| a.category_id)
            .collect()
    }

    pub fn with_account_mut<R>(
        &self,
        id: AccountId,
        f: impl FnOnce(&mut Account) -> R,
    ) -> Option<R> {
        let mut accounts = self.accounts.lock().unwrap();
        accounts.iter_mut().find(|a| a.id == id).map(f)
    }

    fn replace_providing(&self, account_id: AccountId, providing: &[CategoryAssociation]) {
        let mut associations = self.associations.lock().unwrap();
        associations
            .retain(|a| !(a.account_id == account_id && a.role == ServiceRole::Providing));
        associations.extend_from_slice(providing);
    }

    fn store(&self, account: &Account) {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(existing) = accounts.iter_mut().find(|a| a.id == account.id) {
            *existing = account.clone();
        } else {
            accounts.push(account.clone());
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        self.store(account);
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        if self.get(account.id).is_none() {
            return Err(DomainError::new(
                ErrorCode::AccountNotFound,
                format!("Account {} not found", account.id),
            ));
        }
        self.store(account);
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn providing_categories(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<CategoryId>, DomainError> {
        Ok(self.categories_of(account_id, ServiceRole::Providing))
    }
}

pub struct InMemoryInvoiceStore {
    accounts: Arc<InMemoryAccountStore>,
    invoices: Mutex<Vec<Invoice>>,
}

impl InMemoryInvoiceStore {
    pub fn new(accounts: Arc<InMemoryAccountStore>) -> Self {
        Self {
            accounts,
            invoices: Mutex::new(Vec::new()),
        }
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.invoices.lock().unwrap().clone()
    }

    fn stored_status(&self, id: InvoiceId) -> Result<InvoiceStatus, InvoiceError> {
        self.invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.status)
            .ok_or(InvoiceError::NotFound(id))
    }

    fn replace(&self, invoice: &Invoice) {
        let mut invoices = self.invoices.lock().unwrap();
        if let Some(existing) = invoices.iter_mut().find(|i| i.id == invoice.id) {
            *existing = invoice.clone();
        }
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert_with_debit(&self, invoice: &Invoice) -> Result<Credits, InvoiceError> {
        let balance = self
            .accounts
            .with_account_mut(invoice.mentee_id, |account| account.debit(invoice.amount))
            .ok_or(InvoiceError::AccountNotFound(invoice.mentee_id))??;
        self.invoices.lock().unwrap().push(invoice.clone());
        Ok(balance)
    }

    async fn mark_paid_with_credit(&self, invoice: &Invoice) -> Result<Credits, InvoiceError> {
        let stored = self.stored_status(invoice.id)?;
        if stored != InvoiceStatus::Pending {
            return Err(InvoiceError::InvalidTransition {
                from: stored,
                to: InvoiceStatus::Paid,
            });
        }
        let balance = self
            .accounts
            .with_account_mut(invoice.mentor_id, |account| account.credit(invoice.amount))
            .ok_or(InvoiceError::AccountNotFound(invoice.mentor_id))??;
        self.replace(invoice);
        Ok(balance)
    }

    async fn update_cancelled(&self, invoice: &Invoice) -> Result<(), InvoiceError> {
        let stored = self.stored_status(invoice.id)?;
        if stored != InvoiceStatus::Pending {
            return Err(InvoiceError::InvalidTransition {
                from: stored,
                to: InvoiceStatus::Cancelled,
            });
        }
        self.replace(invoice);
        Ok(())
    }

    async fn find_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
        Ok(self.invoices.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }

    async fn list_by_mentor(&self, mentor_id: AccountId) -> Result<Vec<Invoice>, InvoiceError> {
        let mut found: Vec<Invoice> = self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.mentor_id == mentor_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn list_by_mentee(&self, mentee_id: AccountId) -> Result<Vec<Invoice>, InvoiceError> {
        let mut found: Vec<Invoice> = self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.mentee_id == mentee_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }
}

pub struct InMemoryVerificationStore {
    accounts: Arc<InMemoryAccountStore>,
    verifications: Mutex<Vec<Verification>>,
}

impl InMemoryVerificationStore {
    pub fn new(accounts: Arc<InMemoryAccountStore>) -> Self {
        Self {
            accounts,
            verifications: Mutex::new(Vec::new()),
        }
    }

    pub fn verifications(&self) -> Vec<Verification> {
        self.verifications.lock().unwrap().clone()
    }

    fn stored_status(&self, id: VerificationId) -> Result<VerificationStatus, VerificationError> {
        self.verifications
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.status)
            .ok_or(VerificationError::NotFound(id))
    }

    fn replace(&self, verification: &Verification) {
        let mut verifications = self.verifications.lock().unwrap();
        if let Some(existing) = verifications.iter_mut().find(|v| v.id == verification.id) {
            *existing = verification.clone();
        }
    }

    fn guard_pending(&self, verification: &Verification) -> Result<(), VerificationError> {
        let stored = self.stored_status(verification.id)?;
        if stored != VerificationStatus::Pending {
            return Err(VerificationError::InvalidTransition {
                from: stored,
                to: verification.status,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VerificationStore for InMemoryVerificationStore {
    async fn insert_pending(
        &self,
        verification: &Verification,
        account: &Account,
    ) -> Result<(), VerificationError> {
        self.accounts.store(account);
        self.verifications.lock().unwrap().push(verification.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: VerificationId,
    ) -> Result<Option<Verification>, VerificationError> {
        Ok(self
            .verifications
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    async fn list(
        &self,
        status: Option<VerificationStatus>,
    ) -> Result<Vec<Verification>, VerificationError> {
        let mut found: Vec<Verification> = self
            .verifications
            .lock()
            .unwrap()
            .iter()
            .filter(|v| status.map_or(true, |s| v.status == s))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn list_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Verification>, VerificationError> {
        let mut found: Vec<Verification> = self
            .verifications
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.account_id == account_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn commit_approval(
        &self,
        verification: &Verification,
        account: &Account,
        providing: &[CategoryAssociation],
    ) -> Result<(), VerificationError> {
        self.guard_pending(verification)?;
        self.replace(verification);
        self.accounts.store(account);
        self.accounts.replace_providing(account.id, providing);
        Ok(())
    }

    async fn commit_decline(
        &self,
        verification: &Verification,
        account: &Account,
    ) -> Result<(), VerificationError> {
        self.guard_pending(verification)?;
        self.replace(verification);
        self.accounts.store(account);
        Ok(())
    }
}

pub struct InMemoryCreditLedger {
    accounts: Arc<InMemoryAccountStore>,
    processed: Mutex<HashSet<String>>,
}

impl InMemoryCreditLedger {
    pub fn new(accounts: Arc<InMemoryAccountStore>) -> Self {
        Self {
            accounts,
            processed: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl CreditLedger for InMemoryCreditLedger {
    async fn debit(&self, account_id: AccountId, amount: Credits) -> Result<Credits, LedgerError> {
        self.accounts
            .with_account_mut(account_id, |account| account.debit(amount))
            .ok_or(LedgerError::AccountNotFound(account_id))?
    }

    async fn credit(&self, account_id: AccountId, amount: Credits) -> Result<Credits, LedgerError> {
        self.accounts
            .with_account_mut(account_id, |account| account.credit(amount))
            .ok_or(LedgerError::AccountNotFound(account_id))?
    }

    async fn credit_once(
        &self,
        account_id: AccountId,
        amount: Credits,
        event_id: &PaymentEventId,
    ) -> Result<CreditOutcome, LedgerError> {
        let mut processed = self.processed.lock().unwrap();
        if !processed.insert(event_id.as_str().to_string()) {
            return Ok(CreditOutcome::AlreadyApplied);
        }
        let balance = self
            .accounts
            .with_account_mut(account_id, |account| account.credit(amount))
            .ok_or(LedgerError::AccountNotFound(account_id))??;
        Ok(CreditOutcome::Applied(balance))
    }
}

/// Blob store recording keys, returning deterministic URLs.
#[derive(Default)]
pub struct FakeBlobStore {
    keys: Mutex<Vec<String>>,
}

impl FakeBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for FakeBlobStore {
    async fn put(
        &self,
        key: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, DomainError> {
        self.keys.lock().unwrap().push(key.to_string());
        Ok(format!("https://files.test/{}", key))
    }
}

/// Notifier recording every delivered notification.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: Notification) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

/// Gateway that verifies webhooks against a real verifier and records
/// checkout session requests.
pub struct StubGateway {
    verifier: PaymentWebhookVerifier,
    requests: Mutex<Vec<CreateCheckoutRequest>>,
}

impl StubGateway {
    pub fn new(webhook_secret: &str) -> Self {
        Self {
            verifier: PaymentWebhookVerifier::new(webhook_secret),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CreateCheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckoutGateway for StubGateway {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, DomainError> {
        self.requests.lock().unwrap().push(request);
        Ok(CheckoutSession {
            id: "cs_test_session".to_string(),
            url: "https://checkout.test/cs_test_session".to_string(),
        })
    }

    fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<PaymentWebhookEvent, WebhookError> {
        self.verifier.verify_and_parse(payload, signature)
    }
}
