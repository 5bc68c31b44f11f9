use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// Read an entire file into memory.
pub fn slurp_file(path: &str) -> Result<Vec<u8>> {
    let bytes = fs_err::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path);
    Ok(bytes)
}

/// Pretty-print an object as JSON, indented by 4 spaces and terminated with a newline.
pub fn to_json<T: Serialize>(obj: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    obj.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(String::from_utf8(buf)?)
}

/// Create (or truncate) `path` and write `obj` there, in the same format as `to_json`.
pub fn write_json<T: Serialize>(path: &str, obj: &T) -> Result<()> {
    let json = to_json(obj)?;
    let mut file = fs_err::File::create(path)?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("writing {}", path))?;
    file.flush()?;
    Ok(())
}
