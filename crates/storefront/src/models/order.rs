//! Checkout form and order receipt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planetsmart_core::{Impact, Price};

use super::CartLine;

/// How the member chose to pay. No payment is actually taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOption {
    #[default]
    Card,
    Upi,
    CashOnDelivery,
}

impl std::str::FromStr for PaymentOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            "cod" | "cash_on_delivery" => Ok(Self::CashOnDelivery),
            _ => Err(format!("invalid payment option: {s}")),
        }
    }
}

/// The shipping and payment form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub address: String,
    pub pin_code: String,
    #[serde(default)]
    pub payment: PaymentOption,
}

impl ShippingDetails {
    /// Names of required fields left blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [("address", &self.address), ("pin code", &self.pin_code)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

/// What a completed checkout hands back. Nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub confirmation: Uuid,
    pub lines: Vec<CartLine>,
    pub total: Price,
    pub impact: Impact,
    pub eco_points: u64,
    pub payment: PaymentOption,
    pub placed_at: DateTime<Utc>,
}
