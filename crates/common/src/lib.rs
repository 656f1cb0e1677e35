//! Shared identifier types used across the NF-e workspace.

mod types;

pub use types::{ACCESS_KEY_LEN, AccessKey, InvoiceId};
