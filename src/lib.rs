pub mod boundary;
pub mod dictionary;
pub mod error;
pub mod io;
pub mod mapper;
pub mod patch;
pub mod registry;

pub use boundary::PatchField;
pub use boundary::implicit_gradient::{ImplicitGradientPatchField, TransferParameters};
pub use boundary::mixed::MixedPatchField;
pub use dictionary::{Dictionary, FieldValue};
pub use error::{Error, Result};
pub use mapper::{DirectMapper, FaceMapper};
pub use patch::Patch;
