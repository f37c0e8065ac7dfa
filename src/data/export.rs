use std::path::Path;

use anyhow::{Context, Result};

use super::model::ObservationTable;

pub const STATUS_COLUMN: &str = "Anomaly Status";

/// Serialise the selected observations as CSV: source columns in source order,
/// then the status label. No index column.
pub fn filtered_csv(table: &ObservationTable, indices: &[usize]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let header = table
        .columns
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(STATUS_COLUMN));
    writer.write_record(header).context("writing CSV header")?;

    for &idx in indices {
        let row = table
            .rows
            .get(idx)
            .with_context(|| format!("row index {idx} out of range"))?;
        let record = row
            .fields
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(row.anomaly.label()));
        writer
            .write_record(record)
            .with_context(|| format!("writing row {}", row.row_label))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))
}

/// Write the filtered observations to `path`. Returns the number of rows written.
pub fn export_filtered(table: &ObservationTable, indices: &[usize], path: &Path) -> Result<usize> {
    let bytes = filtered_csv(table, indices)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} rows to {}", indices.len(), path.display());
    Ok(indices.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter_observations, FilterState};
    use crate::data::loader::load_observations;
    use crate::data::model::AnomalyFlag;

    const SOURCE: &str = "Date,Fuel_Flow,Efficiency,anomaly\n\
                          2024-01-01,\"1,200\",80,1\n\
                          2024-01-02,1100,60,-1\n\
                          2024-01-03,1150,75,1\n";

    #[test]
    fn export_reparses_to_the_same_rows_plus_status() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("obs.csv");
        std::fs::write(&src, SOURCE).unwrap();
        let table = load_observations(&src).unwrap();

        let filter = FilterState {
            start: table.rows[0].date,
            end: table.rows[1].date,
            anomalies_only: false,
        };
        let indices = filter_observations(&table, &filter);

        let out = dir.path().join("filtered_boiler_data.csv");
        assert_eq!(export_filtered(&table, &indices, &out).unwrap(), 2);

        let mut reader = csv::Reader::from_path(&out).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, ["Date", "Fuel_Flow", "Efficiency", "anomaly", STATUS_COLUMN]);

        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), indices.len());
        for (record, &idx) in records.iter().zip(&indices) {
            let row = &table.rows[idx];
            let cells: Vec<&str> = record.iter().collect();
            assert_eq!(&cells[..4], row.fields.as_slice());
            let expected = match cells[3] {
                "-1" => AnomalyFlag::Anomaly.label(),
                "1" => AnomalyFlag::Normal.label(),
                other => panic!("unexpected sentinel {other}"),
            };
            assert_eq!(cells[4], expected);
        }

        let reloaded = load_observations(&out).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.rows[0].fields[1], "1,200");
    }

    #[test]
    fn empty_selection_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("obs.csv");
        std::fs::write(&src, SOURCE).unwrap();
        let table = load_observations(&src).unwrap();

        let bytes = filtered_csv(&table, &[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Date,Fuel_Flow,Efficiency,anomaly,Anomaly Status\n"
        );
    }
}
