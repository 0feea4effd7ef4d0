use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{MetoceanError, MetoceanResult};
use crate::models::Workbook;

/// Path of the JSON hand-off for a workbook: the workbook name with a
/// `.json` extension, inside `dir`.
pub fn report_json_path(dir: &Path, workbook: &str) -> PathBuf {
    dir.join(Path::new(workbook).with_extension("json"))
}

/// Serialize a report as pretty JSON next to where its workbook goes.
///
/// `NaN` values (empty cells) are written as `null`. Returns the path
/// written.
pub fn write_report_json<R>(report: &R, dir: &Path) -> MetoceanResult<PathBuf>
where
    R: Workbook + Serialize,
{
    fs::create_dir_all(dir).map_err(|e| MetoceanError::io(dir, e))?;
    let path = report_json_path(dir, report.workbook_name());

    let file = File::create(&path).map_err(|e| MetoceanError::io(&path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush().map_err(|e| MetoceanError::io(&path, e))?;

    log::info!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScatterReport, ScatterSheet};

    #[test]
    fn test_json_path_replaces_extension() {
        let path = report_json_path(Path::new("/out"), "Demo_Metocean_NSS_Tables.xlsx");
        assert_eq!(path, PathBuf::from("/out/Demo_Metocean_NSS_Tables.json"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = ScatterReport {
            project: "Demo".to_string(),
            workbook: "Demo_Metocean_Scatter_Tables.xlsx".to_string(),
            sheets: vec![ScatterSheet {
                name: "Hs-WaveDir".to_string(),
                rows: Vec::new(),
            }],
        };

        let path = write_report_json(&report, &dir.path().join("reports")).unwrap();
        assert!(path.ends_with("Demo_Metocean_Scatter_Tables.json"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["project"], "Demo");
        assert_eq!(json["sheets"][0]["name"], "Hs-WaveDir");
    }
}
