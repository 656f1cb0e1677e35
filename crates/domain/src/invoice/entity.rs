//! Invoice entity.

use chrono::{DateTime, SubsecRound, Utc};
use common::{AccessKey, InvoiceId};
use invoice_store::{InvoiceRecord, Version};

use crate::error::DomainError;

use super::{InvoiceError, InvoiceStatus, KeyGenerator, Money, RandomKeyGenerator, TaxId};

/// Invoice aggregate root.
///
/// Created only through [`Invoice::create`] (or rehydrated from a stored
/// record, which is re-validated). Everything except the status is immutable
/// once issued.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    /// Unique invoice identifier.
    id: InvoiceId,

    /// Fiscal access key.
    key: AccessKey,

    /// Tax id of the issuing company.
    issuer_tax_id: TaxId,

    /// Tax id of the recipient.
    recipient_tax_id: TaxId,

    /// Invoice total, always positive.
    total_value: Money,

    /// Current status.
    status: InvoiceStatus,

    /// When the invoice was issued.
    created_at: DateTime<Utc>,

    /// Stored version for optimistic concurrency.
    version: Version,
}

impl Invoice {
    /// Creates a new invoice in the `Issued` state with a random access key.
    ///
    /// Fails before anything is allocated if either tax id is not exactly
    /// 14 digits or the total is not strictly positive.
    pub fn create(
        issuer_tax_id: &str,
        recipient_tax_id: &str,
        total_value: Money,
    ) -> Result<Self, InvoiceError> {
        Self::create_with(&RandomKeyGenerator, issuer_tax_id, recipient_tax_id, total_value)
    }

    /// Creates a new invoice, drawing its access key from `generator`.
    pub fn create_with<G: KeyGenerator + ?Sized>(
        generator: &G,
        issuer_tax_id: &str,
        recipient_tax_id: &str,
        total_value: Money,
    ) -> Result<Self, InvoiceError> {
        let issuer = TaxId::parse(issuer_tax_id)
            .ok_or_else(|| InvoiceError::InvalidIssuerTaxId(issuer_tax_id.to_string()))?;
        let recipient = TaxId::parse(recipient_tax_id)
            .ok_or_else(|| InvoiceError::InvalidRecipientTaxId(recipient_tax_id.to_string()))?;

        if !total_value.is_positive() {
            return Err(InvoiceError::NonPositiveTotal { total: total_value });
        }

        Ok(Self {
            id: InvoiceId::new(),
            key: generator.generate_key(),
            issuer_tax_id: issuer,
            recipient_tax_id: recipient,
            total_value,
            status: InvoiceStatus::Issued,
            // Microsecond precision, the finest a TIMESTAMPTZ column keeps.
            created_at: Utc::now().trunc_subsecs(6),
            version: Version::first(),
        })
    }

    /// Moves the invoice to `Cancelled`.
    ///
    /// Fails without changing anything if the invoice is already cancelled.
    pub fn cancel(&mut self) -> Result<(), InvoiceError> {
        self.transition_to(InvoiceStatus::Cancelled)
    }

    fn transition_to(&mut self, target: InvoiceStatus) -> Result<(), InvoiceError> {
        if !InvoiceStatus::can_transition(self.status, target) {
            return Err(InvoiceError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    pub(crate) fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Converts the invoice into its storage representation.
    pub fn to_record(&self) -> InvoiceRecord {
        InvoiceRecord {
            id: self.id,
            key: self.key.clone(),
            issuer_tax_id: self.issuer_tax_id.to_string(),
            recipient_tax_id: self.recipient_tax_id.to_string(),
            total_cents: self.total_value.cents(),
            status: self.status.as_str().to_string(),
            created_at: self.created_at,
            version: self.version,
        }
    }
}

// Query methods
impl Invoice {
    /// Returns the invoice ID.
    pub fn id(&self) -> InvoiceId {
        self.id
    }

    /// Returns the access key.
    pub fn key(&self) -> &AccessKey {
        &self.key
    }

    /// Returns the issuer tax id.
    pub fn issuer_tax_id(&self) -> &TaxId {
        &self.issuer_tax_id
    }

    /// Returns the recipient tax id.
    pub fn recipient_tax_id(&self) -> &TaxId {
        &self.recipient_tax_id
    }

    /// Returns the invoice total.
    pub fn total_value(&self) -> Money {
        self.total_value
    }

    /// Returns the current status.
    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    /// Returns when the invoice was issued.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the stored version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns true if the invoice has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status.is_terminal()
    }
}

impl TryFrom<InvoiceRecord> for Invoice {
    type Error = DomainError;

    fn try_from(record: InvoiceRecord) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| DomainError::CorruptRecord {
            key: record.key.clone(),
            reason,
        };

        if !record.key.is_well_formed() {
            return Err(corrupt("access key is not 44 characters".to_string()));
        }
        let issuer_tax_id = TaxId::parse(&record.issuer_tax_id)
            .ok_or_else(|| corrupt(format!("issuer tax id {:?}", record.issuer_tax_id)))?;
        let recipient_tax_id = TaxId::parse(&record.recipient_tax_id)
            .ok_or_else(|| corrupt(format!("recipient tax id {:?}", record.recipient_tax_id)))?;
        let total_value = Money::from_cents(record.total_cents);
        if !total_value.is_positive() {
            return Err(corrupt(format!("total {total_value}")));
        }
        let status = record
            .status
            .parse::<InvoiceStatus>()
            .map_err(|e| corrupt(e.to_string()))?;

        Ok(Self {
            id: record.id,
            key: record.key,
            issuer_tax_id,
            recipient_tax_id,
            total_value,
            status,
            created_at: record.created_at,
            version: record.version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "12345678901234";
    const RECIPIENT: &str = "98765432109876";

    struct FixedKey(String);

    impl KeyGenerator for FixedKey {
        fn generate_key(&self) -> AccessKey {
            AccessKey::new(self.0.clone())
        }
    }

    #[test]
    fn test_create_issues_invoice() {
        let invoice = Invoice::create(ISSUER, RECIPIENT, Money::from_cents(10000)).unwrap();

        assert_eq!(invoice.status(), InvoiceStatus::Issued);
        assert_eq!(invoice.key().as_str().len(), 44);
        assert_eq!(invoice.issuer_tax_id().as_str(), ISSUER);
        assert_eq!(invoice.recipient_tax_id().as_str(), RECIPIENT);
        assert_eq!(invoice.total_value(), Money::from_cents(10000));
        assert_eq!(invoice.version(), Version::first());
        assert!(!invoice.is_cancelled());
    }

    #[test]
    fn test_create_assigns_fresh_identity() {
        let a = Invoice::create(ISSUER, RECIPIENT, Money::from_cents(1)).unwrap();
        let b = Invoice::create(ISSUER, RECIPIENT, Money::from_cents(1)).unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_create_uses_generator() {
        let key = "K".repeat(44);
        let invoice = Invoice::create_with(
            &FixedKey(key.clone()),
            ISSUER,
            RECIPIENT,
            Money::from_cents(1),
        )
        .unwrap();
        assert_eq!(invoice.key().as_str(), key);
    }

    #[test]
    fn test_create_rejects_bad_tax_ids() {
        assert!(matches!(
            Invoice::create("123", RECIPIENT, Money::from_cents(1)),
            Err(InvoiceError::InvalidIssuerTaxId(_))
        ));
        assert!(matches!(
            Invoice::create(ISSUER, "9876543210987x", Money::from_cents(1)),
            Err(InvoiceError::InvalidRecipientTaxId(_))
        ));
    }

    #[test]
    fn test_create_rejects_non_positive_total() {
        assert!(matches!(
            Invoice::create(ISSUER, RECIPIENT, Money::zero()),
            Err(InvoiceError::NonPositiveTotal { .. })
        ));
        assert!(matches!(
            Invoice::create(ISSUER, RECIPIENT, Money::from_cents(-100)),
            Err(InvoiceError::NonPositiveTotal { .. })
        ));
    }

    #[test]
    fn test_cancel_once() {
        let mut invoice = Invoice::create(ISSUER, RECIPIENT, Money::from_cents(1)).unwrap();

        invoice.cancel().unwrap();
        assert_eq!(invoice.status(), InvoiceStatus::Cancelled);

        let err = invoice.cancel().unwrap_err();
        assert!(matches!(
            err,
            InvoiceError::InvalidStatusTransition {
                from: InvoiceStatus::Cancelled,
                to: InvoiceStatus::Cancelled,
            }
        ));
        assert_eq!(invoice.status(), InvoiceStatus::Cancelled);
    }

    #[test]
    fn test_record_round_trip() {
        let mut invoice = Invoice::create(ISSUER, RECIPIENT, Money::from_cents(4250)).unwrap();
        invoice.cancel().unwrap();

        let record = invoice.to_record();
        assert_eq!(record.status, "Cancelled");
        assert_eq!(record.total_cents, 4250);

        let restored = Invoice::try_from(record).unwrap();
        assert_eq!(restored, invoice);
    }

    #[test]
    fn test_created_at_survives_microsecond_storage() {
        for _ in 0..100 {
            let invoice = Invoice::create(ISSUER, RECIPIENT, Money::from_cents(1)).unwrap();
            assert_eq!(invoice.created_at().timestamp_subsec_nanos() % 1_000, 0);

            let mut record = invoice.to_record();
            record.created_at = record.created_at.trunc_subsecs(6);

            let restored = Invoice::try_from(record).unwrap();
            assert_eq!(restored, invoice);
            assert_eq!(restored.created_at().to_rfc3339(), invoice.created_at().to_rfc3339());
        }
    }

    #[test]
    fn test_corrupt_record_is_rejected() {
        let invoice = Invoice::create(ISSUER, RECIPIENT, Money::from_cents(1)).unwrap();

        let mut bad_status = invoice.to_record();
        bad_status.status = "Emitida".to_string();
        assert!(matches!(
            Invoice::try_from(bad_status),
            Err(DomainError::CorruptRecord { .. })
        ));

        let mut bad_total = invoice.to_record();
        bad_total.total_cents = 0;
        assert!(matches!(
            Invoice::try_from(bad_total),
            Err(DomainError::CorruptRecord { .. })
        ));

        let mut bad_key = invoice.to_record();
        bad_key.key = AccessKey::from("short");
        assert!(matches!(
            Invoice::try_from(bad_key),
            Err(DomainError::CorruptRecord { .. })
        ));
    }
}
