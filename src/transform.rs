use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EtlError;
use crate::model::{EnrichedSale, SaleRecord};

/// Derive `total_amount` and `month` for every row, preserving input order.
///
/// Date parsing is strict `%Y-%m-%d`; one bad date fails the whole batch so
/// nothing reaches the load phase.
pub fn enrich(rows: Vec<SaleRecord>) -> Result<Vec<EnrichedSale>, EtlError> {
    rows.into_iter()
        .enumerate()
        .map(|(row, record)| enrich_row(row, record))
        .collect()
}

fn enrich_row(row: usize, record: SaleRecord) -> Result<EnrichedSale, EtlError> {
    let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").map_err(|source| {
        EtlError::Date {
            row,
            value: record.date.clone(),
            source,
        }
    })?;
    let total_amount = record.price * Decimal::from(record.quantity);
    let month = date.format("%Y-%m").to_string();
    debug!(order_id = %record.order_id, %total_amount, %month, "enriched");

    Ok(EnrichedSale {
        order_id: record.order_id,
        customer_name: record.customer_name,
        product: record.product,
        price: record.price,
        quantity: record.quantity,
        total_amount,
        date,
        month,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::sample_rows;
    use rust_decimal_macros::dec;

    #[test]
    fn totals_are_price_times_quantity() {
        let enriched = enrich(sample_rows()).unwrap();
        assert_eq!(enriched.len(), 5);
        let totals: Vec<Decimal> = enriched.iter().map(|e| e.total_amount).collect();
        assert_eq!(
            totals,
            vec![dec!(50000), dec!(3000), dec!(3000), dec!(25000), dec!(30000)]
        );
        for e in &enriched {
            assert_eq!(e.total_amount, e.price * Decimal::from(e.quantity));
        }
    }

    #[test]
    fn month_is_the_year_month_prefix() {
        let enriched = enrich(sample_rows()).unwrap();
        assert!(enriched.iter().all(|e| e.month == "2024-01"));
        assert_eq!(
            enriched[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn fractional_prices_stay_exact() {
        let mut rows = sample_rows();
        rows[0].price = dec!(19.99);
        rows[0].quantity = 3;
        let enriched = enrich(rows).unwrap();
        assert_eq!(enriched[0].total_amount, dec!(59.97));
    }

    #[test]
    fn impossible_date_fails_with_row_and_value() {
        let mut rows = sample_rows();
        rows[2].date = "2024-13-45".to_string();
        match enrich(rows) {
            Err(EtlError::Date { row, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "2024-13-45");
            }
            other => panic!("expected Date error, got {other:?}"),
        }
    }

    #[test]
    fn non_iso_date_fails() {
        let mut rows = sample_rows();
        rows[0].date = "15/01/2024".to_string();
        assert!(matches!(enrich(rows), Err(EtlError::Date { .. })));
    }
}
