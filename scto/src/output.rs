use std::io::Write;

use camino::Utf8Path;
use color_eyre::eyre::Result;

use surveycto::{FormData, RepeatGroupData};

/// Write data to the file at `output`, or to stdout if not given.
pub fn write(output: Option<&Utf8Path>, data: &[u8]) -> Result<()> {
    match output {
        Some(path) => fs_err::write(path.as_std_path(), data)?,
        None => std::io::stdout().lock().write_all(data)?,
    }
    Ok(())
}

/// Read a private key file.
pub fn read_key(path: Option<&Utf8Path>) -> Result<Option<Vec<u8>>> {
    let key = path.map(|p| fs_err::read(p.as_std_path())).transpose()?;
    Ok(key)
}

/// Text representation of form data. JSON is pretty-printed, and the
/// tables of long data are printed one after another under a
/// `== name ==` heading.
pub fn render(data: &FormData) -> Result<String> {
    let text = match data {
        FormData::Csv(csv) => csv.clone(),
        FormData::Json(value) => with_newline(serde_json::to_string_pretty(value)?),
        FormData::RepeatGroups(groups) => render_repeat_groups(groups),
    };
    Ok(text)
}

fn render_repeat_groups(groups: &RepeatGroupData) -> String {
    groups
        .iter()
        .map(|(name, csv)| format!("== {} ==\n{}", name, with_newline(csv.to_string())))
        .collect()
}

fn with_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
