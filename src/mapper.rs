use ndarray::{Array1, ArrayView1};

use crate::error::{Error, Result};

/// Maps per-face data from an old face set onto a new one.
pub trait FaceMapper {
    /// Number of faces after mapping.
    fn size(&self) -> usize;
    fn map(&self, old: ArrayView1<f64>) -> Result<Array1<f64>>;
}

/// Each new face takes the value of exactly one old face.
#[derive(Clone, Debug)]
pub struct DirectMapper {
    addressing: Vec<usize>,
    old_size: usize,
}

impl DirectMapper {
    /// `addressing[new_face] = old_face`.
    pub fn new(addressing: Vec<usize>, old_size: usize) -> Result<Self> {
        if let Some((new_face, old_face)) = addressing
            .iter()
            .enumerate()
            .find(|(_, old)| **old >= old_size)
        {
            return Err(Error::InvalidMapping(format!(
                "new face {} maps from old face {}, but only {} old faces exist",
                new_face, old_face, old_size
            )));
        }
        Ok(Self {
            addressing,
            old_size,
        })
    }
    pub fn identity(size: usize) -> Self {
        Self {
            addressing: (0..size).collect(),
            old_size: size,
        }
    }
    pub fn addressing(&self) -> &[usize] {
        &self.addressing
    }
}

impl FaceMapper for DirectMapper {
    fn size(&self) -> usize {
        self.addressing.len()
    }
    fn map(&self, old: ArrayView1<f64>) -> Result<Array1<f64>> {
        if old.len() != self.old_size {
            return Err(Error::SizeMismatch {
                what: "mapped per-face array",
                expected: self.old_size,
                actual: old.len(),
            });
        }
        Ok(self.addressing.iter().map(|&iold| old[iold]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_direct_mapping_refines_faces() {
        // each old face split into two
        let mapper = DirectMapper::new(vec![0, 0, 1, 1], 2).unwrap();
        let mapped = mapper.map(array![1.5, 2.5].view()).unwrap();
        assert_eq!(mapper.size(), 4);
        assert_eq!(mapper.addressing(), &[0, 0, 1, 1]);
        assert_eq!(mapped, array![1.5, 1.5, 2.5, 2.5]);
    }

    #[test]
    fn test_invalid_addressing() {
        assert!(matches!(
            DirectMapper::new(vec![0, 3], 2),
            Err(Error::InvalidMapping(_))
        ));
        let mapper = DirectMapper::identity(3);
        assert!(mapper.map(array![1.0].view()).is_err());
    }
}
