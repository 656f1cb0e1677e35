//! Access key generation.

use common::{ACCESS_KEY_LEN, AccessKey};
use uuid::Uuid;

/// Source of access keys for newly issued invoices.
pub trait KeyGenerator: Send + Sync {
    /// Produces a new key of exactly 44 characters.
    fn generate_key(&self) -> AccessKey;
}

/// Generates simulated access keys from random UUIDs.
///
/// A key is the 128 random bits of a v4 UUID written as 32 upper-case hex
/// digits, right-padded with `'0'` to 44 characters. This is a simulated key
/// space: it carries no check digit, is not derived from the invoice's
/// content, and is not a valid real-world NF-e access key.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomKeyGenerator;

impl KeyGenerator for RandomKeyGenerator {
    fn generate_key(&self) -> AccessKey {
        let hex = Uuid::new_v4().simple().to_string().to_uppercase();
        AccessKey::new(format!("{hex:0<width$}", width = ACCESS_KEY_LEN))
    }
}
