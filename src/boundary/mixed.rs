//! Generic mixed (blended Dirichlet/Neumann) patch field.
//!
//! Per face, the applied condition is
//! `(1 - f) * dphi/dn + f * delta * (phi_b - ref_value) = (1 - f) * ref_grad`
//! where `f` is the value fraction. `f = 1` recovers a fixed value and
//! `f = 0` a fixed gradient.

use ndarray::{Array1, ArrayView1, Zip};

use crate::error::{Error, Result};
use crate::mapper::FaceMapper;
use crate::patch::Patch;

#[derive(Clone, Debug, PartialEq)]
pub struct MixedPatchField {
    value: Array1<f64>,
    ref_value: Array1<f64>,
    ref_grad: Array1<f64>,
    value_fraction: Array1<f64>,
    updated: bool,
}

fn check_size(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::SizeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

impl MixedPatchField {
    pub fn new(size: usize) -> Self {
        Self::from_value(Array1::zeros(size))
    }
    pub fn from_value(value: Array1<f64>) -> Self {
        let size = value.len();
        Self {
            value,
            ref_value: Array1::zeros(size),
            ref_grad: Array1::zeros(size),
            value_fraction: Array1::zeros(size),
            updated: false,
        }
    }
    /// Maps every per-face array onto the new face set. The result still
    /// needs a coefficient update before use.
    pub fn remapped(&self, mapper: &dyn FaceMapper) -> Result<Self> {
        Ok(Self {
            value: mapper.map(self.value.view())?,
            ref_value: mapper.map(self.ref_value.view())?,
            ref_grad: mapper.map(self.ref_grad.view())?,
            value_fraction: mapper.map(self.value_fraction.view())?,
            updated: false,
        })
    }
    pub fn size(&self) -> usize {
        self.value.len()
    }
    pub fn value(&self) -> ArrayView1<f64> {
        self.value.view()
    }
    pub fn ref_value(&self) -> ArrayView1<f64> {
        self.ref_value.view()
    }
    pub fn ref_grad(&self) -> ArrayView1<f64> {
        self.ref_grad.view()
    }
    pub fn value_fraction(&self) -> ArrayView1<f64> {
        self.value_fraction.view()
    }
    pub fn updated(&self) -> bool {
        self.updated
    }
    pub fn reset_updated(&mut self) {
        self.updated = false;
    }
    /// Replaces the three coefficient arrays. All must match the current
    /// face count.
    pub fn set_coeffs(
        &mut self,
        value_fraction: Array1<f64>,
        ref_value: Array1<f64>,
        ref_grad: Array1<f64>,
    ) -> Result<()> {
        let size = self.size();
        check_size("value fraction", size, value_fraction.len())?;
        check_size("reference value", size, ref_value.len())?;
        check_size("reference gradient", size, ref_grad.len())?;
        self.value_fraction = value_fraction;
        self.ref_value = ref_value;
        self.ref_grad = ref_grad;
        Ok(())
    }
    pub fn update_coeffs(&mut self) {
        self.updated = true;
    }
    /// Computes the applied face value from the current coefficients and the
    /// adjacent interior values, then clears the update flag.
    pub fn evaluate(&mut self, patch: &Patch, internal: ArrayView1<f64>) -> Result<()> {
        check_size("patch faces", self.size(), patch.size())?;
        let internal_values = patch.patch_internal_field(internal)?;
        Zip::from(&mut self.value)
            .and(&internal_values)
            .and(&self.value_fraction)
            .and(&self.ref_value)
            .and(&self.ref_grad)
            .and(&patch.delta_coeffs())
            .for_each(|value, &phi_c, &f, &ref_value, &ref_grad, &delta| {
                let gradient_part = if delta > 0.0 {
                    phi_c + ref_grad / delta
                } else {
                    phi_c
                };
                *value = f * ref_value + (1.0 - f) * gradient_part;
            });
        self.updated = false;
        Ok(())
    }
    /// Face-normal gradient implied by the current coefficients.
    pub fn sn_grad(&self, patch: &Patch, internal: ArrayView1<f64>) -> Result<Array1<f64>> {
        check_size("patch faces", self.size(), patch.size())?;
        let internal_values = patch.patch_internal_field(internal)?;
        let mut grad = Array1::zeros(self.size());
        Zip::from(&mut grad)
            .and(&internal_values)
            .and(&self.value_fraction)
            .and(&self.ref_value)
            .and(&self.ref_grad)
            .and(&patch.delta_coeffs())
            .for_each(|g, &phi_c, &f, &ref_value, &ref_grad, &delta| {
                *g = f * delta * (ref_value - phi_c) + (1.0 - f) * ref_grad;
            });
        Ok(grad)
    }
    pub fn value_internal_coeffs(&self) -> Array1<f64> {
        self.value_fraction.mapv(|f| 1.0 - f)
    }
    pub fn value_boundary_coeffs(&self, delta: ArrayView1<f64>) -> Result<Array1<f64>> {
        check_size("delta coefficients", self.size(), delta.len())?;
        let mut coeffs = Array1::zeros(self.size());
        Zip::from(&mut coeffs)
            .and(&self.value_fraction)
            .and(&self.ref_value)
            .and(&self.ref_grad)
            .and(&delta)
            .for_each(|c, &f, &ref_value, &ref_grad, &delta| {
                let grad_term = if delta > 0.0 { ref_grad / delta } else { 0.0 };
                *c = f * ref_value + (1.0 - f) * grad_term;
            });
        Ok(coeffs)
    }
    pub fn gradient_internal_coeffs(&self, delta: ArrayView1<f64>) -> Result<Array1<f64>> {
        check_size("delta coefficients", self.size(), delta.len())?;
        Ok(-&self.value_fraction * &delta)
    }
    pub fn gradient_boundary_coeffs(&self, delta: ArrayView1<f64>) -> Result<Array1<f64>> {
        check_size("delta coefficients", self.size(), delta.len())?;
        let mut coeffs = Array1::zeros(self.size());
        Zip::from(&mut coeffs)
            .and(&self.value_fraction)
            .and(&self.ref_value)
            .and(&self.ref_grad)
            .and(&delta)
            .for_each(|c, &f, &ref_value, &ref_grad, &delta| {
                *c = f * delta * ref_value + (1.0 - f) * ref_grad;
            });
        Ok(coeffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::DirectMapper;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn two_face_patch() -> Patch {
        Patch::new("side", vec![0, 1], array![4.0, 2.0]).unwrap()
    }

    #[test]
    fn test_fixed_value_limit() {
        let patch = two_face_patch();
        let internal = array![1.0, 3.0];
        let mut mixed = MixedPatchField::new(2);
        mixed
            .set_coeffs(array![1.0, 1.0], array![5.0, 7.0], array![0.0, 0.0])
            .unwrap();
        mixed.evaluate(&patch, internal.view()).unwrap();
        assert_eq!(mixed.value(), array![5.0, 7.0]);
        let grad = mixed.sn_grad(&patch, internal.view()).unwrap();
        assert_relative_eq!(grad[0], 4.0 * (5.0 - 1.0));
        assert_relative_eq!(grad[1], 2.0 * (7.0 - 3.0));
    }

    #[test]
    fn test_fixed_gradient_limit() {
        let patch = two_face_patch();
        let internal = array![1.0, 3.0];
        let mut mixed = MixedPatchField::new(2);
        mixed
            .set_coeffs(array![0.0, 0.0], array![5.0, 7.0], array![8.0, -2.0])
            .unwrap();
        mixed.evaluate(&patch, internal.view()).unwrap();
        assert_relative_eq!(mixed.value()[0], 1.0 + 8.0 / 4.0);
        assert_relative_eq!(mixed.value()[1], 3.0 - 2.0 / 2.0);
        let grad = mixed.sn_grad(&patch, internal.view()).unwrap();
        assert_eq!(grad, array![8.0, -2.0]);
    }

    #[test]
    fn test_implicit_coeffs_reproduce_evaluated_value() {
        let patch = two_face_patch();
        let internal = array![1.0, 3.0];
        let mut mixed = MixedPatchField::new(2);
        mixed
            .set_coeffs(array![0.25, 0.75], array![2.0, 4.0], array![1.0, 0.5])
            .unwrap();
        mixed.evaluate(&patch, internal.view()).unwrap();
        let internal_coeffs = mixed.value_internal_coeffs();
        let boundary_coeffs = mixed.value_boundary_coeffs(patch.delta_coeffs()).unwrap();
        for i in 0..2 {
            assert_relative_eq!(
                internal_coeffs[i] * internal[i] + boundary_coeffs[i],
                mixed.value()[i],
                epsilon = 1e-14
            );
        }
        let grad = mixed.sn_grad(&patch, internal.view()).unwrap();
        let g_internal = mixed.gradient_internal_coeffs(patch.delta_coeffs()).unwrap();
        let g_boundary = mixed.gradient_boundary_coeffs(patch.delta_coeffs()).unwrap();
        for i in 0..2 {
            assert_relative_eq!(
                g_internal[i] * internal[i] + g_boundary[i],
                grad[i],
                epsilon = 1e-14
            );
        }
    }

    #[test]
    fn test_update_flag() {
        let patch = two_face_patch();
        let mut mixed = MixedPatchField::new(2);
        assert!(!mixed.updated());
        mixed.update_coeffs();
        assert!(mixed.updated());
        mixed.evaluate(&patch, array![0.0, 0.0].view()).unwrap();
        assert!(!mixed.updated());
    }

    #[test]
    fn test_size_checks() {
        let mut mixed = MixedPatchField::new(2);
        assert!(mixed
            .set_coeffs(array![0.0], array![0.0, 0.0], array![0.0, 0.0])
            .is_err());
        let patch = Patch::new("other", vec![0], array![1.0]).unwrap();
        assert!(mixed.evaluate(&patch, array![1.0].view()).is_err());
    }

    #[test]
    fn test_remapped_state() {
        let mut mixed = MixedPatchField::from_value(array![1.0, 2.0]);
        mixed
            .set_coeffs(array![0.1, 0.2], array![3.0, 4.0], array![0.0, 0.0])
            .unwrap();
        mixed.update_coeffs();
        let mapper = DirectMapper::new(vec![1, 0, 1], 2).unwrap();
        let remapped = mixed.remapped(&mapper).unwrap();
        assert_eq!(remapped.size(), 3);
        assert_eq!(remapped.value(), array![2.0, 1.0, 2.0]);
        assert_eq!(remapped.value_fraction(), array![0.2, 0.1, 0.2]);
        assert_eq!(remapped.ref_value(), array![4.0, 3.0, 4.0]);
        assert!(!remapped.updated());
    }
}
