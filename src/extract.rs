//! Reshaping of flattened variational-inference sample output.
//!
//! Fit results store every cell of a multi-dimensional parameter as its own
//! named column: `"a[2,3]"` holds one value per draw for a single cell of
//! `a`. [`extract_vb_samples`] groups those columns by base name, infers
//! each parameter's shape from the largest index seen per dimension and
//! scatters the columns into arrays of shape `(num_samples,) + shape`.

use std::collections::{hash_map::Entry, HashMap};

use log::debug;
use ndarray::ArrayD;
use num_traits::Zero;

use crate::error::ExtractError;
use crate::params::parse_param_name;

/// Variational-inference fit output as produced by the model-fitting stage:
/// one raw (possibly bracket-indexed) name per flat sample column.
#[derive(Debug, Clone, PartialEq)]
pub struct VbFit<T> {
    pub param_names: Vec<String>,
    pub params: Vec<Vec<T>>,
}

impl<T> VbFit<T> {
    pub fn new(param_names: Vec<impl Into<String>>, params: Vec<Vec<T>>) -> Self {
        Self {
            param_names: param_names.into_iter().map(|n| n.into()).collect(),
            params,
        }
    }
}

/// Reshapes the flat per-cell sample columns of `fit` into one array per
/// parameter, keyed by base name.
///
/// Every returned array carries the draws on its leading axis: a scalar
/// parameter yields shape `(num_samples,)`, a matrix parameter observed up
/// to `"a[2,3]"` yields `(num_samples, 2, 3)`. Cells the fit never names
/// stay zero.
///
/// # Examples
///
/// ```rust
/// use vb_extract::extract::{extract_vb_samples, VbFit};
///
/// let fit = VbFit::new(
///     vec!["a[2]", "a[1]"],
///     vec![vec![1.0, 3.0], vec![0.0, 2.0]],
/// );
/// let samples = extract_vb_samples(&fit)?;
/// assert_eq!(samples["a"].shape(), &[2, 2]);
/// assert_eq!(samples["a"][[0, 0]], 0.0);
/// assert_eq!(samples["a"][[0, 1]], 1.0);
/// # Ok::<(), vb_extract::error::ExtractError>(())
/// ```
///
/// # Errors
///
/// Returns an [`ExtractError`] when a raw name fails to parse, a bracket
/// index is zero, the two fit fields have different lengths, a column's
/// sample count differs from the first column's, or two columns of one
/// parameter disagree on its dimensionality.
pub fn extract_vb_samples<T>(fit: &VbFit<T>) -> Result<HashMap<String, ArrayD<T>>, ExtractError>
where
    T: Copy + Zero,
{
    if fit.param_names.len() != fit.params.len() {
        return Err(ExtractError::MisalignedFit {
            names: fit.param_names.len(),
            columns: fit.params.len(),
        });
    }

    let num_samples = fit.params.first().map_or(0, Vec::len);

    // First pass: validate column lengths, parse names into 0-based cell
    // offsets and grow each parameter's shape to cover the largest offset
    // seen per dimension.
    let mut entries = Vec::with_capacity(fit.param_names.len());
    let mut shapes: HashMap<String, Vec<usize>> = HashMap::new();
    for (raw, column) in fit.param_names.iter().zip(&fit.params) {
        if column.len() != num_samples {
            return Err(ExtractError::SampleCountMismatch {
                name: raw.clone(),
                expected: num_samples,
                got: column.len(),
            });
        }

        let (name, indices) = parse_param_name(raw)?;
        let mut offsets = Vec::with_capacity(indices.len());
        for ix in indices {
            match ix.checked_sub(1) {
                Some(offset) => offsets.push(offset),
                None => return Err(ExtractError::ZeroIndex { name }),
            }
        }

        match shapes.entry(name.clone()) {
            Entry::Occupied(mut entry) => {
                let shape = entry.get_mut();
                if shape.len() != offsets.len() {
                    return Err(ExtractError::ArityMismatch {
                        name,
                        expected: shape.len(),
                        got: offsets.len(),
                    });
                }
                for (dim, &offset) in shape.iter_mut().zip(&offsets) {
                    *dim = (*dim).max(offset + 1);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(offsets.iter().map(|&offset| offset + 1).collect());
            }
        }
        entries.push((name, offsets));
    }

    debug!(
        "Extracting {} parameters from {} columns with {} samples each.",
        shapes.len(),
        entries.len(),
        num_samples
    );

    // Second pass: allocate `(num_samples,) + shape` per parameter and
    // scatter each column across the sample axis.
    let mut out: HashMap<String, ArrayD<T>> = shapes
        .into_iter()
        .map(|(name, shape)| {
            let mut dims = Vec::with_capacity(shape.len() + 1);
            dims.push(num_samples);
            dims.extend(shape);
            (name, ArrayD::zeros(dims))
        })
        .collect();

    for ((name, offsets), column) in entries.iter().zip(&fit.params) {
        let array = out
            .get_mut(name)
            .expect("Expected an array to be allocated for every parsed name");
        let mut index = vec![0; offsets.len() + 1];
        index[1..].copy_from_slice(offsets);
        for (s, &value) in column.iter().enumerate() {
            index[0] = s;
            array[&index[..]] = value;
        }
    }

    Ok(out)
}
