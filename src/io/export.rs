//! CSV export of saved calculations and text export of reports.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::record::CalculationRecord;

/// Column header for the history CSV export.
const HEADER: &str = "id,site_name,date,time,item_count,diversity_factor_pct,\
                      total_w,effective_w,dc_amps,rectifier_a,utilization_pct,status";

/// Exports saved records to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_history_csv<'a>(
    records: impl IntoIterator<Item = &'a CalculationRecord>,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_history_csv(records, buf)
}

/// Writes saved records as CSV to any writer, one row per record in the
/// order given. Figures use the report roundings.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_history_csv<'a>(
    records: impl IntoIterator<Item = &'a CalculationRecord>,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in records {
        let f = r.figures();
        let ts = r.timestamp();
        wtr.write_record(&[
            r.id().to_string(),
            r.site_name().to_string(),
            ts.format("%Y-%m-%d").to_string(),
            ts.format("%H:%M:%S").to_string(),
            r.items().len().to_string(),
            r.diversity_factor_pct().to_string(),
            format!("{:.0}", f.total_w),
            format!("{:.0}", f.effective_w),
            format!("{:.2}", f.dc_amps),
            f.rectifier_a.to_string(),
            format!("{:.1}", f.utilization_pct),
            f.recommendation.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes report text into `dir`, creating `dir` if needed, and returns the
/// path written.
///
/// Existing files are never overwritten: if `file_name` is taken, `_2`,
/// `_3`, ... is appended to its stem until a free name is found.
///
/// # Errors
///
/// Returns an `io::Error` if the directory or file cannot be written.
pub fn export_report(report: &str, dir: &Path, file_name: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .map_or_else(|| file_name.into(), |s| s.to_string_lossy());
    let ext = name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = 1u32;
    loop {
        let path = if n == 1 {
            dir.join(file_name)
        } else {
            dir.join(format!("{stem}_{n}{ext}"))
        };
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(report.as_bytes())?;
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::catalog::EquipmentCatalog;
    use crate::record::History;
    use crate::session::Session;

    fn history() -> History {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(8, 30, 0))
            .expect("valid timestamp");
        let mut s = Session::with_catalog(Arc::new(EquipmentCatalog::builtin()));
        s.set_site_name("Tower, East");
        s.add_model("Ericsson 4449 B2", 2).ok();
        s.add_model("Ericsson DUS 41", 1).ok();
        s.save_at(ts);
        s.clear_items();
        s.set_site_name("");
        s.set_diversity_factor_pct(100.0);
        s.add_model("Nokia AirScale", 5).ok();
        s.save_at(ts);
        s.history().clone()
    }

    #[test]
    fn header_and_row_count() {
        let h = history();
        let mut buf = Vec::new();
        write_history_csv(h.iter(), &mut buf).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines.first().copied(),
            Some(
                "id,site_name,date,time,item_count,diversity_factor_pct,\
                 total_w,effective_w,dc_amps,rectifier_a,utilization_pct,status"
            )
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn rows_parse_back_with_rounded_figures() {
        let h = history();
        let mut buf = Vec::new();
        write_history_csv(h.iter(), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let rows: Vec<csv::StringRecord> = rdr.records().filter_map(Result::ok).collect();
        assert_eq!(rows.len(), 2);

        // most recent first
        assert_eq!(&rows[0][1], "Unnamed Site");
        assert_eq!(&rows[0][8], "52.08");
        assert_eq!(&rows[0][9], "100");

        // quoted comma survives
        assert_eq!(&rows[1][1], "Tower, East");
        assert_eq!(&rows[1][4], "2");
        assert_eq!(&rows[1][6], "950");
        assert_eq!(&rows[1][10], "52.8");
        assert_eq!(&rows[1][11], "Adequate");
    }

    #[test]
    fn report_export_writes_named_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let target = dir.path().join("reports");
        let path = export_report("hello\n", &target, "DC_Load_X_2024-06-01.txt")
            .expect("export should succeed");
        assert_eq!(path, target.join("DC_Load_X_2024-06-01.txt"));
        assert_eq!(fs::read_to_string(&path).ok().as_deref(), Some("hello\n"));
    }

    #[test]
    fn report_export_never_overwrites() {
        let dir = tempfile::tempdir().expect("temp dir");
        let name = "DC_Load_X_2024-06-01.txt";
        let first = export_report("one\n", dir.path(), name).expect("first export");
        let second = export_report("two\n", dir.path(), name).expect("second export");
        let third = export_report("three\n", dir.path(), name).expect("third export");

        assert_eq!(first, dir.path().join(name));
        assert_eq!(second, dir.path().join("DC_Load_X_2024-06-01_2.txt"));
        assert_eq!(third, dir.path().join("DC_Load_X_2024-06-01_3.txt"));
        assert_eq!(fs::read_to_string(&first).ok().as_deref(), Some("one\n"));
        assert_eq!(fs::read_to_string(&second).ok().as_deref(), Some("two\n"));
    }
}
