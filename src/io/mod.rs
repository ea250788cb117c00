// src/io/mod.rs
pub mod features;
pub mod grid;
pub mod poscar;
pub mod xyz;

use crate::model::Structure;
use std::io;
use std::path::Path;

pub fn load_structure(path: &Path) -> io::Result<Structure> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if name.ends_with(".xyz") || name.ends_with(".extxyz") {
        xyz::parse(path)
    } else {
        // POSCAR, CONTCAR, *.vasp and anything unrecognised
        poscar::parse(path)
    }
}
