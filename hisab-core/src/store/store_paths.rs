use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

pub fn year_folder_name(date: NaiveDate) -> String {
    format!("{}", date.format("%Y"))
}

pub fn month_file_name(date: NaiveDate) -> String {
    format!("{}.toml", date.format("%m"))
}

/// `{root}/YYYY/MM.toml`, the file holding every entry of `date`'s month.
pub fn month_file(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(year_folder_name(date))
        .join(month_file_name(date))
}

/// Every `.toml` file under `path`, recursively. A missing directory yields nothing.
pub fn scan_dir_for_toml_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut file_paths = Vec::new();
    if !path.exists() {
        return Ok(file_paths);
    }

    for entry in fs::read_dir(path).with_context(|| format!("listing {}", path.display()))? {
        let entry = entry?;
        let p = entry.path();

        if p.is_dir() {
            file_paths.extend(scan_dir_for_toml_files(&p)?);
        } else if p.is_file() && is_toml(&p) {
            file_paths.push(p);
        }
    }

    file_paths.sort();
    Ok(file_paths)
}

fn is_toml(p: &Path) -> bool {
    p.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}
