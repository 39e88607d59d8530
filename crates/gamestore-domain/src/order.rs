//! Order domain types.

use serde::{Deserialize, Serialize};

/// Status of a completed purchase record.
///
/// Wire format: `i16` database column. Every order is created `Approved`;
/// the ledger is immutable, so no transitions exist after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Approved = 0,
}

impl OrderStatus {
    /// Convert from the stored wire value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::Approved),
            _ => None,
        }
    }

    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
        }
    }
}
