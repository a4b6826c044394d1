use ndarray::{Array1, ArrayView1};

use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::mapper::FaceMapper;
use crate::patch::Patch;

pub mod implicit_gradient;
pub mod mixed;

use mixed::MixedPatchField;

/// Capabilities a host solver needs from a scalar patch field.
pub trait PatchField: std::fmt::Debug {
    /// Name the field is selected by in a configuration dictionary.
    fn type_name(&self) -> &'static str;
    fn patch_name(&self) -> &str;
    fn field_name(&self) -> &str;
    fn mixed(&self) -> &MixedPatchField;
    /// Refreshes the per-face coefficients. A no-op if already updated since
    /// the last evaluation.
    fn update_coeffs(&mut self, patch: &Patch) -> Result<()>;
    /// Updates coefficients if needed, then applies them to obtain face values.
    fn evaluate(&mut self, patch: &Patch, internal: ArrayView1<f64>) -> Result<()>;
    fn sn_grad(&self, patch: &Patch, internal: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.mixed().sn_grad(patch, internal)
    }
    fn write(&self) -> Result<Dictionary>;
    fn clone_box(&self) -> Box<dyn PatchField>;
    /// Copy attached to a different field.
    fn clone_for_field(&self, field_name: &str) -> Box<dyn PatchField>;
    /// Copy onto a changed face set.
    fn remap(&self, patch: &Patch, mapper: &dyn FaceMapper) -> Result<Box<dyn PatchField>>;
}

impl Clone for Box<dyn PatchField> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
