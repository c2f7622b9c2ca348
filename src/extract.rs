use std::path::Path;

use tracing::info;

use crate::error::EtlError;
use crate::model::SaleRecord;

/// Parse the sales CSV at `path` into memory. Expects the header row and
/// column order produced by [`crate::generate::write_sample_csv`].
#[tracing::instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn read_sales<P: AsRef<Path>>(path: P) -> Result<Vec<SaleRecord>, EtlError> {
    let path = path.as_ref();
    let csv_err = |source: csv::Error| EtlError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::Reader::from_path(path).map_err(csv_err)?;
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: SaleRecord = result.map_err(csv_err)?;
        rows.push(record);
    }
    info!("extracted {} rows", rows.len());
    Ok(rows)
}
