//! Supported payment methods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    GooglePay,
    Vnpay,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::GooglePay => "google_pay",
            PaymentMethod::Vnpay => "vnpay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google_pay" => Ok(PaymentMethod::GooglePay),
            "vnpay" => Ok(PaymentMethod::Vnpay),
            other => Err(LedgerError::UnsupportedMethod(other.to_string())),
        }
    }
}
