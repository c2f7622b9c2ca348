use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::EtlError;
use crate::model::SaleRecord;

/// The fixed five-row sample dataset. All dates fall in January 2024.
pub fn sample_rows() -> Vec<SaleRecord> {
    let raw: [(&str, &str, &str, i64, u32, &str); 5] = [
        ("ORD001", "John", "Laptop", 50_000, 1, "2024-01-15"),
        ("ORD002", "Jane", "Mouse", 1_500, 2, "2024-01-16"),
        ("ORD003", "Bob", "Keyboard", 3_000, 1, "2024-01-17"),
        ("ORD004", "Alice", "Monitor", 25_000, 1, "2024-01-18"),
        ("ORD005", "Mike", "Phone", 30_000, 1, "2024-01-19"),
    ];
    raw.into_iter()
        .map(
            |(order_id, customer_name, product, price, quantity, date)| SaleRecord {
                order_id: order_id.to_string(),
                customer_name: customer_name.to_string(),
                product: product.to_string(),
                price: Decimal::from(price),
                quantity,
                date: date.to_string(),
            },
        )
        .collect()
}

/// Write the sample dataset to `path` as a headered CSV, overwriting any
/// existing file.
#[tracing::instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn write_sample_csv<P: AsRef<Path>>(path: P) -> Result<(), EtlError> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path).map_err(|source| EtlError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = sample_rows();
    let count = rows.len();
    for row in rows {
        wtr.serialize(row).map_err(|source| EtlError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    }
    wtr.flush().map_err(|source| EtlError::Csv {
        path: path.to_path_buf(),
        source: source.into(),
    })?;
    info!("wrote {} sample rows", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn five_rows_fixed_values() {
        let rows = sample_rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].order_id, "ORD001");
        assert_eq!(rows[0].price, dec!(50000));
        assert_eq!(rows[1].quantity, 2);
        assert_eq!(rows[4].product, "Phone");
        assert!(rows.iter().all(|r| r.date.starts_with("2024-01-")));
    }

    #[test]
    fn csv_has_header_and_overwrites() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sales_data.csv");

        std::fs::write(&path, "stale content from an earlier run")?;
        write_sample_csv(&path)?;

        let text = std::fs::read_to_string(&path)?;
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("order_id,customer_name,product,price,quantity,date")
        );
        assert_eq!(lines.count(), 5);
        assert!(!text.contains("stale"));
        Ok(())
    }
}
