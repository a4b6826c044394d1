use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// Per-face field entry, either one value for every face or a full list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Uniform(f64),
    NonUniform(Vec<f64>),
}

impl FieldValue {
    /// Collapses to `Uniform` when every face carries the same value.
    pub fn from_array(values: ArrayView1<f64>) -> Self {
        match values.first() {
            Some(&first) if values.iter().all(|&v| v.to_bits() == first.to_bits()) => {
                FieldValue::Uniform(first)
            }
            _ => FieldValue::NonUniform(values.to_vec()),
        }
    }
    pub fn to_array(&self, size: usize) -> Result<Array1<f64>> {
        match self {
            FieldValue::Uniform(v) => Ok(Array1::from_elem(size, *v)),
            FieldValue::NonUniform(values) => {
                if values.len() != size {
                    return Err(Error::SizeMismatch {
                        what: "field value entry",
                        expected: size,
                        actual: values.len(),
                    });
                }
                Ok(Array1::from(values.clone()))
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: Map<String, Value>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
    pub fn insert_word(&mut self, key: &str, word: &str) {
        self.entries
            .insert(key.to_owned(), Value::String(word.to_owned()));
    }
    pub fn insert_scalar(&mut self, key: &str, value: f64) -> Result<()> {
        let number = Number::from_f64(value).ok_or_else(|| Error::InvalidEntry {
            key: key.to_owned(),
            expected: "finite scalar",
        })?;
        self.entries.insert(key.to_owned(), Value::Number(number));
        Ok(())
    }
    pub fn insert_field(&mut self, key: &str, field: &FieldValue) -> Result<()> {
        let finite = match field {
            FieldValue::Uniform(v) => v.is_finite(),
            FieldValue::NonUniform(values) => values.iter().all(|v| v.is_finite()),
        };
        if !finite {
            return Err(Error::InvalidEntry {
                key: key.to_owned(),
                expected: "finite field value",
            });
        }
        self.entries
            .insert(key.to_owned(), serde_json::to_value(field)?);
        Ok(())
    }
    pub fn get_word(&self, key: &str) -> Result<&str> {
        match self.entries.get(key) {
            Some(Value::String(word)) => Ok(word.as_str()),
            Some(_) => Err(Error::InvalidEntry {
                key: key.to_owned(),
                expected: "word",
            }),
            None => Err(Error::MissingKey(key.to_owned())),
        }
    }
    pub fn get_scalar(&self, key: &str) -> Result<f64> {
        self.lookup_scalar(&[key])
    }
    /// Looks up the first of `keys` present in the dictionary. The error for
    /// a missing entry names the first (canonical) key.
    pub fn lookup_scalar(&self, keys: &[&str]) -> Result<f64> {
        for key in keys {
            if let Some(value) = self.entries.get(*key) {
                return value.as_f64().ok_or_else(|| Error::InvalidEntry {
                    key: (*key).to_owned(),
                    expected: "scalar",
                });
            }
        }
        let canonical = keys.first().copied().unwrap_or_default();
        Err(Error::MissingKey(canonical.to_owned()))
    }
    pub fn get_field(&self, key: &str) -> Result<Option<FieldValue>> {
        match self.entries.get(key) {
            Some(value) => {
                let field = FieldValue::deserialize(value).map_err(|_| Error::InvalidEntry {
                    key: key.to_owned(),
                    expected: "field value",
                })?;
                Ok(Some(field))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_lookup_prefers_first_key_and_accepts_alias() {
        let dict = Dictionary::from_json_str(r#"{"H": 2.0, "D_CO2_l": 1e-9}"#).unwrap();
        assert_eq!(dict.lookup_scalar(&["H_cc", "H"]).unwrap(), 2.0);
        assert_eq!(dict.lookup_scalar(&["D_CO2_l", "D"]).unwrap(), 1e-9);
        match dict.lookup_scalar(&["K_ext", "K"]) {
            Err(Error::MissingKey(key)) => assert_eq!(key, "K_ext"),
            other => panic!("expected missing key, got {:?}", other),
        }
    }

    #[test]
    fn test_non_scalar_entry_is_rejected() {
        let dict = Dictionary::from_json_str(r#"{"H_cc": "one"}"#).unwrap();
        assert!(matches!(
            dict.get_scalar("H_cc"),
            Err(Error::InvalidEntry { expected: "scalar", .. })
        ));
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut dict = Dictionary::new();
        dict.insert_word("type", "implicitGradient");
        dict.insert_scalar("K_ext", 1.0).unwrap();
        dict.insert_scalar("H_cc", 2.0).unwrap();
        let keys: Vec<&str> = dict.keys().collect();
        assert_eq!(keys, vec!["type", "K_ext", "H_cc"]);
        let reread = Dictionary::from_json_str(&dict.to_json_string().unwrap()).unwrap();
        assert_eq!(reread, dict);
    }

    #[test]
    fn test_field_value_uniform_collapse() {
        let uniform = FieldValue::from_array(array![0.5, 0.5, 0.5].view());
        assert_eq!(uniform, FieldValue::Uniform(0.5));
        let mixed = FieldValue::from_array(array![0.5, 0.25].view());
        assert_eq!(mixed, FieldValue::NonUniform(vec![0.5, 0.25]));
        assert_eq!(uniform.to_array(2).unwrap(), array![0.5, 0.5]);
        assert!(mixed.to_array(3).is_err());
    }

    #[test]
    fn test_non_finite_scalar_is_rejected() {
        let mut dict = Dictionary::new();
        assert!(dict.insert_scalar("H_cc", f64::NAN).is_err());
        assert!(dict
            .insert_field("value", &FieldValue::NonUniform(vec![1.0, f64::INFINITY]))
            .is_err());
        assert!(dict.is_empty());
    }
}
