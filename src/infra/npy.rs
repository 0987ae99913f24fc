// ============================================================
// Layer 6 — Token Tensor Files (.npy)
// ============================================================
// Reads and writes the encoded token stream as a NumPy .npy
// file so a NumPy-based trainer can `np.load` it directly.
//
// Layout (format version 1.0):
//
//   \x93NUMPY            magic (6 bytes)
//   0x01 0x00            major / minor version
//   u16 little-endian    header length
//   header               Python dict literal, space padded,
//                        newline terminated; magic + version +
//                        length + header is a multiple of 64
//   data                 raw little-endian elements
//
// We always write 1-D `<i8` (int64). On read, `<i4` is accepted
// too, since older corpora were saved with 32-bit ids.

use std::{fs, path::Path};

use crate::domain::error::{TuneError, TuneResult};

const MAGIC: &[u8] = b"\x93NUMPY";
const ALIGN: usize = 64;

/// Encode token ids as the bytes of a 1-D int64 .npy file.
pub fn to_bytes(ids: &[u32]) -> Vec<u8> {
    let mut header = format!(
        "{{'descr': '<i8', 'fortran_order': False, 'shape': ({},), }}",
        ids.len()
    );

    // 6 magic + 2 version + 2 length + header + '\n'
    let unpadded = MAGIC.len() + 4 + header.len() + 1;
    let padding  = (ALIGN - unpadded % ALIGN) % ALIGN;
    header.push_str(&" ".repeat(padding));
    header.push('\n');

    let mut out = Vec::with_capacity(MAGIC.len() + 4 + header.len() + ids.len() * 8);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&[1, 0]);
    out.extend_from_slice(&(header.len() as u16).to_le_bytes());
    out.extend_from_slice(header.as_bytes());
    for &id in ids {
        out.extend_from_slice(&i64::from(id).to_le_bytes());
    }
    out
}

/// Decode a 1-D integer .npy file back into token ids.
/// `path` is only used to label errors.
pub fn from_bytes(bytes: &[u8], path: &Path) -> TuneResult<Vec<u32>> {
    let invalid = |reason: &str| TuneError::invalid(path, reason);

    if bytes.len() < MAGIC.len() + 4 || &bytes[..MAGIC.len()] != MAGIC {
        return Err(invalid("not a .npy file"));
    }

    let (major, minor) = (bytes[6], bytes[7]);
    let (header_len, header_start) = match major {
        1 => (u16::from_le_bytes([bytes[8], bytes[9]]) as usize, 10),
        2 | 3 if bytes.len() >= 12 => (
            u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize,
            12,
        ),
        _ => return Err(invalid(&format!("unsupported .npy version {major}.{minor}"))),
    };

    let data_start = header_start + header_len;
    let header = bytes
        .get(header_start..data_start)
        .and_then(|h| std::str::from_utf8(h).ok())
        .ok_or_else(|| invalid("truncated header"))?;

    let descr = header_value(header, "descr").ok_or_else(|| invalid("header has no descr"))?;
    let width = match descr.trim_matches('\'') {
        "<i8" => 8,
        "<i4" => 4,
        other => return Err(invalid(&format!("unsupported dtype {other}, expected <i8 or <i4"))),
    };

    if header_value(header, "fortran_order") == Some("True") {
        return Err(invalid("fortran-ordered arrays are not supported"));
    }

    let shape = header_value(header, "shape").ok_or_else(|| invalid("header has no shape"))?;
    let dims: Vec<&str> = shape
        .trim_matches(|c: char| c == '(' || c == ')')
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();
    let len: usize = match dims.as_slice() {
        [n] => n.parse().map_err(|_| invalid(&format!("bad shape {shape}")))?,
        _   => return Err(invalid(&format!("expected a 1-D array, got shape {shape}"))),
    };

    let expected = len
        .checked_mul(width)
        .ok_or_else(|| invalid(&format!("shape {shape} is too large")))?;
    let data = &bytes[data_start..];
    if data.len() != expected {
        return Err(invalid(&format!(
            "expected {expected} data bytes for {len} elements, found {}",
            data.len()
        )));
    }

    data.chunks_exact(width)
        .map(|chunk| {
            let value = if width == 8 {
                let mut b = [0u8; 8];
                b.copy_from_slice(chunk);
                i64::from_le_bytes(b)
            } else {
                let mut b = [0u8; 4];
                b.copy_from_slice(chunk);
                i64::from(i32::from_le_bytes(b))
            };
            u32::try_from(value).map_err(|_| invalid(&format!("id {value} is not a valid token id")))
        })
        .collect()
}

/// Write ids to `path`, replacing any previous file.
///
/// The bytes go to a sibling `.tmp` file first and are renamed
/// into place, so readers never see a half-written tensor.
pub fn save(path: &Path, ids: &[u32]) -> TuneResult<()> {
    write_replacing(path, &to_bytes(ids))?;
    tracing::debug!("Wrote {} ids to '{}'", ids.len(), path.display());
    Ok(())
}

pub fn load(path: &Path) -> TuneResult<Vec<u32>> {
    let bytes = fs::read(path).map_err(|e| TuneError::io(path, e))?;
    from_bytes(&bytes, path)
}

/// Stage `bytes` next to `path` and rename over it.
pub(crate) fn write_replacing(path: &Path, bytes: &[u8]) -> TuneResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, bytes).map_err(|e| TuneError::io(tmp, e))?;
    fs::rename(tmp, path).map_err(|e| TuneError::io(path, e))
}

/// Pull the raw text of one value out of the header dict literal.
/// Values here are a quoted string, a bool, or a parenthesised tuple.
fn header_value<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!("'{key}':");
    let rest   = header[header.find(&needle)? + needle.len()..].trim_start();

    let end = if rest.starts_with('(') {
        rest.find(')')? + 1
    } else if let Some(quoted) = rest.strip_prefix('\'') {
        quoted.find('\'')? + 2
    } else {
        rest.find(|c: char| c == ',' || c == '}')?
    };
    Some(rest[..end].trim())
}
