//! Array persistence in NumPy `.npy` format.
//!
//! RULE: Only store.rs reads or writes result arrays.
//!
//! Layout (format version 1.0):
//!   magic `\x93NUMPY` | major=1 | minor=0 | u16 LE header length |
//!   ASCII dict header padded with spaces, ending in `\n` |
//!   N × f64 little-endian
//! The data section starts on a 64-byte boundary.

use crate::error::{SimError, SimResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const NPY_MAGIC: &[u8; 6] = b"\x93NUMPY";
const NPY_ALIGN: usize = 64;
/// magic + version + u16 header length
const NPY_PREAMBLE_V1: usize = 10;
/// magic + version + u32 header length
const NPY_PREAMBLE_V2: usize = 12;
const F64_DESCR: &str = "<f8";

/// Build the padded v1.0 header (dict text plus trailing newline).
fn npy_header(len: usize) -> String {
    let dict = format!("{{'descr': '{F64_DESCR}', 'fortran_order': False, 'shape': ({len},), }}");
    let unpadded = NPY_PREAMBLE_V1 + dict.len() + 1;
    let pad = (NPY_ALIGN - unpadded % NPY_ALIGN) % NPY_ALIGN;
    format!("{dict}{}\n", " ".repeat(pad))
}

/// Write `values` as a 1-D float64 array, replacing any existing file.
pub fn write_f64_array(path: impl AsRef<Path>, values: &[f64]) -> SimResult<()> {
    let path = path.as_ref();
    let header = npy_header(values.len());
    let header_len = u16::try_from(header.len())
        .map_err(|_| SimError::Format(format!("header too long: {} bytes", header.len())))?;

    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(NPY_MAGIC)?;
    out.write_all(&[1, 0])?;
    out.write_all(&header_len.to_le_bytes())?;
    out.write_all(header.as_bytes())?;
    for v in values {
        out.write_all(&v.to_le_bytes())?;
    }
    out.flush()?;

    log::debug!("store: wrote {} values to {}", values.len(), path.display());
    Ok(())
}

/// Read a 1-D little-endian float64 `.npy` array.
pub fn read_f64_array(path: impl AsRef<Path>) -> SimResult<Vec<f64>> {
    let bytes = std::fs::read(path)?;
    parse_f64_array(&bytes)
}

fn parse_f64_array(bytes: &[u8]) -> SimResult<Vec<f64>> {
    if bytes.len() < NPY_PREAMBLE_V1 || &bytes[..6] != NPY_MAGIC {
        return Err(SimError::Format("missing NPY magic".into()));
    }

    let (header_start, header_len) = match bytes[6] {
        1 => (
            NPY_PREAMBLE_V1,
            u16::from_le_bytes([bytes[8], bytes[9]]) as usize,
        ),
        2 | 3 => {
            if bytes.len() < NPY_PREAMBLE_V2 {
                return Err(SimError::Format("truncated preamble".into()));
            }
            (
                NPY_PREAMBLE_V2,
                u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize,
            )
        }
        major => return Err(SimError::Format(format!("unsupported version {major}"))),
    };

    let data_start = header_start + header_len;
    let header = bytes
        .get(header_start..data_start)
        .ok_or_else(|| SimError::Format("truncated header".into()))?;
    let header = std::str::from_utf8(header)
        .map_err(|_| SimError::Format("header is not valid text".into()))?;

    let descr = dict_value(header, "descr")
        .map(|v| v.trim_matches('\''))
        .ok_or_else(|| SimError::Format("header has no descr".into()))?;
    if descr != F64_DESCR {
        return Err(SimError::Format(format!("unsupported dtype {descr}")));
    }
    if dict_value(header, "fortran_order") != Some("False") {
        return Err(SimError::Format("fortran-ordered arrays are not supported".into()));
    }
    let len = parse_shape(header)?;

    let payload = &bytes[data_start..];
    let expected = len
        .checked_mul(8)
        .ok_or_else(|| SimError::Format(format!("shape ({len},) overflows")))?;
    if payload.len() != expected {
        return Err(SimError::Format(format!(
            "expected {expected} payload bytes, found {}",
            payload.len()
        )));
    }

    Ok(payload
        .chunks_exact(8)
        .map(|chunk| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect())
}

/// Raw text of `'key': value` up to the next `,` or `}`. Not used for `shape`.
fn dict_value<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let pattern = format!("'{key}':");
    let start = header.find(&pattern)? + pattern.len();
    let rest = &header[start..];
    let end = rest.find([',', '}'])?;
    Some(rest[..end].trim())
}

fn parse_shape(header: &str) -> SimResult<usize> {
    let start = header
        .find("'shape':")
        .and_then(|i| header[i..].find('(').map(|j| i + j + 1))
        .ok_or_else(|| SimError::Format("header has no shape".into()))?;
    let end = header[start..]
        .find(')')
        .map(|j| start + j)
        .ok_or_else(|| SimError::Format("unterminated shape".into()))?;

    let dims: Vec<&str> = header[start..end]
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();
    match dims.as_slice() {
        [n] => n
            .parse()
            .map_err(|_| SimError::Format(format!("bad dimension {n}"))),
        _ => Err(SimError::Format(format!("expected 1-D shape, got ({})", dims.join(", ")))),
    }
}
