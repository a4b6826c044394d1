use std::sync::RwLock;

use hashbrown::HashMap;
use log::info;
use ndarray::ArrayView1;
use once_cell::sync::Lazy;

use crate::boundary::PatchField;
use crate::boundary::implicit_gradient::{self, ImplicitGradientPatchField};
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::patch::Patch;

/// Builds a patch field from its configuration dictionary.
pub type PatchFieldFactory =
    fn(&Patch, &str, ArrayView1<f64>, &Dictionary) -> Result<Box<dyn PatchField>>;

fn implicit_gradient_factory(
    patch: &Patch,
    field_name: &str,
    internal: ArrayView1<f64>,
    dict: &Dictionary,
) -> Result<Box<dyn PatchField>> {
    Ok(Box::new(ImplicitGradientPatchField::from_dictionary(
        patch, field_name, internal, dict,
    )?))
}

static REGISTRY: Lazy<RwLock<HashMap<String, PatchFieldFactory>>> = Lazy::new(|| {
    let mut map: HashMap<String, PatchFieldFactory> = HashMap::new();
    map.insert(
        implicit_gradient::TYPE_NAME.to_owned(),
        implicit_gradient_factory,
    );
    RwLock::new(map)
});

/// Returns `false` if an existing entry was replaced.
pub fn register(name: &str, factory: PatchFieldFactory) -> bool {
    let mut map = REGISTRY.write().unwrap_or_else(|e| e.into_inner());
    let replaced = map.insert(name.to_owned(), factory).is_some();
    info!("registered patch field type {}", name);
    !replaced
}

pub fn available_types() -> Vec<String> {
    let map = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort();
    names
}

/// Constructs the patch field named by the dictionary's `type` entry.
pub fn new_patch_field(
    patch: &Patch,
    field_name: &str,
    internal: ArrayView1<f64>,
    dict: &Dictionary,
) -> Result<Box<dyn PatchField>> {
    let type_name = dict.get_word("type")?;
    let factory = {
        let map = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
        map.get(type_name).copied()
    };
    match factory {
        Some(factory) => factory(patch, field_name, internal, dict),
        None => Err(Error::UnknownPatchType {
            name: type_name.to_owned(),
            available: available_types(),
        }),
    }
}
