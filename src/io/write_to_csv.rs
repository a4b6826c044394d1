use std::path::Path;

use csv::Writer;
use serde::Serialize;

use crate::boundary::PatchField;
use crate::error::{Error, Result};
use crate::patch::Patch;

#[derive(Serialize)]
struct FaceCoeffs {
    face: usize,
    delta: f64,
    value_fraction: f64,
    ref_value: f64,
    ref_grad: f64,
    value: f64,
}

/// One row per face with the current mixed coefficients.
pub fn write_coeffs_to_csv<P: AsRef<Path>>(
    field: &dyn PatchField,
    patch: &Patch,
    filename: P,
) -> Result<()> {
    let mixed = field.mixed();
    if mixed.size() != patch.size() {
        return Err(Error::SizeMismatch {
            what: "patch faces",
            expected: mixed.size(),
            actual: patch.size(),
        });
    }
    let delta = patch.delta_coeffs();
    let mut writer = Writer::from_path(filename)?;
    for iface in 0..patch.size() {
        let data = FaceCoeffs {
            face: iface,
            delta: delta[iface],
            value_fraction: mixed.value_fraction()[iface],
            ref_value: mixed.ref_value()[iface],
            ref_grad: mixed.ref_grad()[iface],
            value: mixed.value()[iface],
        };
        writer.serialize(data)?;
    }
    writer.flush()?;
    Ok(())
}
