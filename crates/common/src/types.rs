use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of an NF-e access key, in characters.
pub const ACCESS_KEY_LEN: usize = 44;

/// Unique identifier for an invoice.
///
/// Wraps a UUID to provide type safety and keep invoice IDs from being
/// mixed up with other UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(Uuid);

impl InvoiceId {
    /// Creates a new random invoice ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an invoice ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for InvoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for InvoiceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<InvoiceId> for Uuid {
    fn from(id: InvoiceId) -> Self {
        id.0
    }
}

/// Fiscal access key ("chave de acesso") identifying an invoice.
///
/// Keys are only ever produced by the key generator, but lookups accept any
/// caller-supplied string, so construction is unchecked. Use
/// [`AccessKey::is_well_formed`] to test the length invariant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessKey(String);

impl AccessKey {
    /// Creates an access key from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the key is exactly [`ACCESS_KEY_LEN`] characters.
    pub fn is_well_formed(&self) -> bool {
        self.0.chars().count() == ACCESS_KEY_LEN
    }

    /// Consumes the key, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for AccessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccessKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccessKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for AccessKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_id_new_creates_unique_ids() {
        let id1 = InvoiceId::new();
        let id2 = InvoiceId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn invoice_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = InvoiceId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn invoice_id_serializes_as_plain_uuid() {
        let id = InvoiceId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }

    #[test]
    fn access_key_well_formed_only_at_44_chars() {
        assert!(AccessKey::new("1".repeat(ACCESS_KEY_LEN)).is_well_formed());
        assert!(!AccessKey::new("1".repeat(ACCESS_KEY_LEN - 1)).is_well_formed());
        assert!(!AccessKey::new("1".repeat(ACCESS_KEY_LEN + 1)).is_well_formed());
        assert!(!AccessKey::from("does-not-exist").is_well_formed());
    }

    #[test]
    fn access_key_is_transparent_in_json() {
        let key = AccessKey::from("ABC");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"ABC\"");
        let back: AccessKey = serde_json::from_str("\"ABC\"").unwrap();
        assert_eq!(back, key);
    }
}
