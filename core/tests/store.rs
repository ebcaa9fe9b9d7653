//! .npy persistence tests.

use laborsim_core::{
    error::SimError,
    store::{read_f64_array, write_f64_array, NPY_MAGIC},
};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("laborsim-{}-{name}.npy", std::process::id()))
}

#[test]
fn written_file_reads_back_bit_exact() {
    let path = temp_path("roundtrip");
    let values = vec![-2.302585092994046, 1.6094379124341003, f64::MIN_POSITIVE, -0.0, 13.8];
    write_f64_array(&path, &values).unwrap();

    let loaded = read_f64_array(&path).unwrap();
    let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&loaded), bits(&values));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn file_layout_is_npy_v1() {
    let path = temp_path("layout");
    write_f64_array(&path, &[1.0, 2.0, 3.0]).unwrap();
    let bytes = std::fs::read(&path).unwrap();

    assert_eq!(&bytes[..6], NPY_MAGIC);
    assert_eq!(&bytes[6..8], &[1u8, 0]);
    let header_len = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
    assert_eq!((10 + header_len) % 64, 0);
    let header = std::str::from_utf8(&bytes[10..10 + header_len]).unwrap();
    assert!(header.contains("'descr': '<f8'"));
    assert!(header.contains("'shape': (3,)"));
    assert_eq!(bytes.len(), 10 + header_len + 3 * 8);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn empty_array_round_trips() {
    let path = temp_path("empty");
    write_f64_array(&path, &[]).unwrap();
    assert!(read_f64_array(&path).unwrap().is_empty());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn existing_file_is_overwritten() {
    let path = temp_path("overwrite");
    write_f64_array(&path, &[1.0; 100]).unwrap();
    write_f64_array(&path, &[7.0]).unwrap();
    assert_eq!(read_f64_array(&path).unwrap(), vec![7.0]);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn truncated_payload_is_rejected() {
    let path = temp_path("truncated");
    write_f64_array(&path, &[1.0, 2.0]).unwrap();
    let mut bytes = std::fs::read(&path).unwrap();
    bytes.truncate(bytes.len() - 4);
    std::fs::write(&path, &bytes).unwrap();

    assert!(matches!(read_f64_array(&path), Err(SimError::Format(_))));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn unwritable_path_is_an_io_error() {
    let path = std::env::temp_dir()
        .join(format!("laborsim-missing-dir-{}", std::process::id()))
        .join("out.npy");
    assert!(matches!(write_f64_array(&path, &[1.0]), Err(SimError::Io(_))));
}
