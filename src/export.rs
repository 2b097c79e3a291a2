use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::filter::FilteredView;

/// Prefix marking an exported file as a filtered subset.
const EXPORT_PREFIX: &str = "filtered_";

/// Write the view as CSV: the dataset header, then one line per visible row.
pub fn write_csv<W: Write>(view: &FilteredView<'_>, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(&view.dataset().columns)
        .context("writing CSV header")?;
    for record in view.records() {
        out.write_record(record.cells.iter().map(|c| c.to_field()))
            .context("writing CSV row")?;
    }
    out.flush().context("flushing CSV output")?;
    Ok(())
}

pub fn to_csv_bytes(view: &FilteredView<'_>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(view, &mut buf)?;
    Ok(buf)
}

/// Write the view to `path`, replacing any existing file.
pub fn save_csv(view: &FilteredView<'_>, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(view, std::io::BufWriter::new(file))
        .with_context(|| format!("exporting to {}", path.display()))?;
    log::info!("Exported {} rows to {}", view.len(), path.display());
    Ok(())
}

/// Suggested download name for a view of `source`: `EA.csv` → `filtered_EA.csv`.
pub fn export_file_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("data");
    format!("{EXPORT_PREFIX}{stem}.csv")
}
