use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the sales CSV. Field order matches the file's column order:
/// `order_id,customer_name,product,price,quantity,date`.
///
/// `date` stays a string here; it is only parsed (strictly, as `YYYY-MM-DD`)
/// during the transform step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub order_id: String,
    pub customer_name: String,
    pub product: String,
    pub price: Decimal,
    pub quantity: u32,
    pub date: String,
}

/// A sale after the transform step: the base fields with the date parsed,
/// plus the two derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSale {
    pub order_id: String,
    pub customer_name: String,
    pub product: String,
    pub price: Decimal,
    pub quantity: u32,
    /// `price * quantity`, exact decimal arithmetic.
    pub total_amount: Decimal,
    pub date: NaiveDate,
    /// `YYYY-MM` of `date`.
    pub month: String,
}
