//! Interfacial mass-transfer condition for a dissolved-gas concentration.
//!
//! The flux through the interface follows
//!
//! ```text
//! D * dphi/dn = -K * (C_ext - phi / H)
//! ```
//!
//! with `n` pointing into the domain. In terms of the outward face-normal
//! gradient this is `sn_grad + alpha * (phi - C_ext * H) = 0` with
//! `alpha = K / (D * H)` and matching it against the mixed form with a zero
//! reference gradient gives `f / (1 - f) * delta = alpha`, i.e.
//! `f = alpha / (alpha + delta)` and `ref_value = C_ext * H`.

use log::{debug, info, warn};
use ndarray::{Array1, ArrayView1};

use crate::boundary::PatchField;
use crate::boundary::mixed::MixedPatchField;
use crate::dictionary::{Dictionary, FieldValue};
use crate::error::{Error, Result};
use crate::mapper::FaceMapper;
use crate::patch::Patch;

pub const TYPE_NAME: &str = "implicitGradient";

/// (canonical keyword, accepted alias)
const HENRY_KEYS: [&str; 2] = ["H_cc", "H"];
const DIFFUSIVITY_KEYS: [&str; 2] = ["D_CO2_l", "D"];
const EXTERNAL_CONCENTRATION_KEYS: [&str; 2] = ["C_CO2_g", "Cext"];
const MASS_TRANSFER_KEYS: [&str; 2] = ["K_ext", "K"];

/// Patch-wide physical constants of the interface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransferParameters {
    /// Henry (partition) coefficient `H`.
    pub henry: f64,
    /// Diffusivity `D` of the species in the liquid.
    pub diffusivity: f64,
    /// Bulk concentration `C_ext` in the external gas.
    pub external_concentration: f64,
    /// External mass-transfer coefficient `K`.
    pub mass_transfer: f64,
}

fn require(name: &'static str, value: f64, ok: bool, requirement: &'static str) -> Result<()> {
    if !value.is_finite() || !ok {
        return Err(Error::InvalidParameter {
            name,
            value,
            requirement,
        });
    }
    Ok(())
}

impl TransferParameters {
    pub fn new(
        henry: f64,
        diffusivity: f64,
        external_concentration: f64,
        mass_transfer: f64,
    ) -> Result<Self> {
        let params = Self {
            henry,
            diffusivity,
            external_concentration,
            mass_transfer,
        };
        params.validate()?;
        Ok(params)
    }
    /// `H` and `D` must be strictly positive, `C_ext` and `K` non-negative.
    /// `K = 0` is accepted as the no-transfer limit. The derived `alpha` and
    /// `C_ext * H` must also be finite.
    pub fn validate(&self) -> Result<()> {
        require(HENRY_KEYS[0], self.henry, self.henry > 0.0, "finite and > 0")?;
        require(
            DIFFUSIVITY_KEYS[0],
            self.diffusivity,
            self.diffusivity > 0.0,
            "finite and > 0",
        )?;
        require(
            EXTERNAL_CONCENTRATION_KEYS[0],
            self.external_concentration,
            self.external_concentration >= 0.0,
            "finite and >= 0",
        )?;
        require(
            MASS_TRANSFER_KEYS[0],
            self.mass_transfer,
            self.mass_transfer >= 0.0,
            "finite and >= 0",
        )?;
        let alpha = self.blending_rate();
        require("alpha", alpha, true, "finite, K / (D * H) must not overflow")?;
        let reference = self.reference_value();
        require("C_ext * H", reference, true, "finite")?;
        Ok(())
    }
    pub fn from_dictionary(dict: &Dictionary) -> Result<Self> {
        Self::new(
            dict.lookup_scalar(&HENRY_KEYS)?,
            dict.lookup_scalar(&DIFFUSIVITY_KEYS)?,
            dict.lookup_scalar(&EXTERNAL_CONCENTRATION_KEYS)?,
            dict.lookup_scalar(&MASS_TRANSFER_KEYS)?,
        )
    }
    pub fn write_entries(&self, dict: &mut Dictionary) -> Result<()> {
        dict.insert_scalar(HENRY_KEYS[0], self.henry)?;
        dict.insert_scalar(DIFFUSIVITY_KEYS[0], self.diffusivity)?;
        dict.insert_scalar(EXTERNAL_CONCENTRATION_KEYS[0], self.external_concentration)?;
        dict.insert_scalar(MASS_TRANSFER_KEYS[0], self.mass_transfer)?;
        Ok(())
    }
    /// `alpha = K / (D * H)`, exactly zero when `K = 0`.
    pub fn blending_rate(&self) -> f64 {
        if self.mass_transfer == 0.0 {
            return 0.0;
        }
        self.mass_transfer / (self.diffusivity * self.henry)
    }
    /// Interior concentration in equilibrium with the external gas.
    pub fn reference_value(&self) -> f64 {
        self.external_concentration * self.henry
    }
}

/// Value fraction for one face. Zero when `alpha = 0`, one when `delta = 0`.
pub fn value_fraction(alpha: f64, delta: f64) -> f64 {
    if alpha == 0.0 {
        0.0
    } else {
        alpha / (alpha + delta)
    }
}

#[derive(Clone, Debug)]
pub struct ImplicitGradientPatchField {
    patch_name: String,
    field_name: String,
    params: TransferParameters,
    mixed: MixedPatchField,
}

impl ImplicitGradientPatchField {
    fn from_parts(
        patch_name: &str,
        field_name: &str,
        params: TransferParameters,
        mixed: MixedPatchField,
    ) -> Self {
        Self {
            patch_name: patch_name.to_owned(),
            field_name: field_name.to_owned(),
            params,
            mixed,
        }
    }
    /// All parameters and coefficients zero. Behaves as a zero-gradient
    /// condition until replaced by a configured instance.
    pub fn inactive(patch: &Patch, field_name: &str) -> Self {
        Self::from_parts(
            &patch.name,
            field_name,
            TransferParameters::default(),
            MixedPatchField::new(patch.size()),
        )
    }
    /// Face values start from the adjacent interior values.
    pub fn new(
        patch: &Patch,
        field_name: &str,
        params: TransferParameters,
        internal: ArrayView1<f64>,
    ) -> Result<Self> {
        params.validate()?;
        let value = patch.patch_internal_field(internal)?;
        Ok(Self::from_parts(
            &patch.name,
            field_name,
            params,
            MixedPatchField::from_value(value),
        ))
    }
    /// Any stored `value` entry is ignored; the faces are initialized from
    /// the interior field.
    pub fn from_dictionary(
        patch: &Patch,
        field_name: &str,
        internal: ArrayView1<f64>,
        dict: &Dictionary,
    ) -> Result<Self> {
        let params = TransferParameters::from_dictionary(dict)?;
        info!(
            "patch {}: {} for {} with H={}, D={}, C_ext={}, K={}",
            patch.name,
            TYPE_NAME,
            field_name,
            params.henry,
            params.diffusivity,
            params.external_concentration,
            params.mass_transfer
        );
        Self::new(patch, field_name, params, internal)
    }
    /// Parameters are patch-wide and carried over unchanged; only the
    /// per-face state is mapped.
    pub fn remapped(&self, patch: &Patch, mapper: &dyn FaceMapper) -> Result<Self> {
        if mapper.size() != patch.size() {
            return Err(Error::SizeMismatch {
                what: "mapped patch faces",
                expected: patch.size(),
                actual: mapper.size(),
            });
        }
        let mixed = self.mixed.remapped(mapper)?;
        Ok(Self::from_parts(
            &patch.name,
            &self.field_name,
            self.params,
            mixed,
        ))
    }
    pub fn with_field(&self, field_name: &str) -> Self {
        Self::from_parts(&self.patch_name, field_name, self.params, self.mixed.clone())
    }
    pub fn params(&self) -> &TransferParameters {
        &self.params
    }
    pub fn mixed_mut(&mut self) -> &mut MixedPatchField {
        &mut self.mixed
    }
}

impl PatchField for ImplicitGradientPatchField {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }
    fn patch_name(&self) -> &str {
        &self.patch_name
    }
    fn field_name(&self) -> &str {
        &self.field_name
    }
    fn mixed(&self) -> &MixedPatchField {
        &self.mixed
    }
    fn update_coeffs(&mut self, patch: &Patch) -> Result<()> {
        if self.mixed.updated() {
            return Ok(());
        }
        let delta = patch.delta_coeffs();
        let alpha = self.params.blending_rate();
        let ndegenerate = delta.iter().filter(|&&d| d == 0.0).count();
        if ndegenerate > 0 {
            warn!(
                "patch {}: {} faces with zero delta coefficient",
                patch.name, ndegenerate
            );
        }
        let value_fractions = delta.mapv(|d| value_fraction(alpha, d));
        let ref_value = Array1::from_elem(delta.len(), self.params.reference_value());
        let ref_grad = Array1::zeros(delta.len());
        self.mixed.set_coeffs(value_fractions, ref_value, ref_grad)?;
        debug!(
            "patch {}: updated {} faces, alpha = {:e}",
            patch.name,
            delta.len(),
            alpha
        );
        self.mixed.update_coeffs();
        Ok(())
    }
    fn evaluate(&mut self, patch: &Patch, internal: ArrayView1<f64>) -> Result<()> {
        if !self.mixed.updated() {
            self.update_coeffs(patch)?;
        }
        self.mixed.evaluate(patch, internal)
    }
    fn write(&self) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        dict.insert_word("type", TYPE_NAME);
        self.params.write_entries(&mut dict)?;
        dict.insert_field("value", &FieldValue::from_array(self.mixed.value()))?;
        Ok(dict)
    }
    fn clone_box(&self) -> Box<dyn PatchField> {
        Box::new(self.clone())
    }
    fn clone_for_field(&self, field_name: &str) -> Box<dyn PatchField> {
        Box::new(self.with_field(field_name))
    }
    fn remap(&self, patch: &Patch, mapper: &dyn FaceMapper) -> Result<Box<dyn PatchField>> {
        Ok(Box::new(self.remapped(patch, mapper)?))
    }
}
