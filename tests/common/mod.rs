use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "op, agreement, type, amount, to_agreement, to_type, commission, number";

/// Writes an operations CSV with the standard header followed by `rows`.
pub fn operations_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}
