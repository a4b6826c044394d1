use ndarray::{Array1, ArrayView1};

use crate::error::{Error, Result};

/// Boundary patch geometry as seen by a patch field.
///
/// `delta_coeffs[i]` is the inverse distance from the centre of face `i` to
/// the centre of its adjacent interior cell `face_cells[i]`.
#[derive(Clone, Debug)]
pub struct Patch {
    pub name: String,
    face_cells: Vec<usize>,
    delta_coeffs: Array1<f64>,
}

impl Patch {
    pub fn new(name: &str, face_cells: Vec<usize>, delta_coeffs: Array1<f64>) -> Result<Self> {
        if face_cells.len() != delta_coeffs.len() {
            return Err(Error::SizeMismatch {
                what: "patch delta coefficients",
                expected: face_cells.len(),
                actual: delta_coeffs.len(),
            });
        }
        if let Some((iface, delta)) = delta_coeffs
            .iter()
            .enumerate()
            .find(|(_, d)| !d.is_finite() || **d < 0.0)
        {
            return Err(Error::InvalidGeometry(format!(
                "patch {} face {} has delta coefficient {}",
                name, iface, delta
            )));
        }
        Ok(Self {
            name: name.to_owned(),
            face_cells,
            delta_coeffs,
        })
    }
    pub fn size(&self) -> usize {
        self.face_cells.len()
    }
    pub fn face_cells(&self) -> &[usize] {
        &self.face_cells
    }
    pub fn delta_coeffs(&self) -> ArrayView1<f64> {
        self.delta_coeffs.view()
    }
    /// Interior cell values adjacent to each face.
    pub fn patch_internal_field(&self, internal: ArrayView1<f64>) -> Result<Array1<f64>> {
        let ncells = internal.len();
        let mut values = Array1::zeros(self.size());
        for (face, &cell) in self.face_cells.iter().enumerate() {
            if cell >= ncells {
                return Err(Error::CellOutOfRange { face, cell, ncells });
            }
            values[face] = internal[cell];
        }
        Ok(values)
    }
}
