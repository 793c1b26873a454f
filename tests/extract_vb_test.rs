//! End-to-end checks of the public extraction API on a realistic
//! variational-inference fit: raw bracket-indexed names go in, shaped
//! per-parameter arrays come out.

use vb_extract::error::ExtractError;
use vb_extract::extract::{extract_vb_samples, VbFit};
use vb_extract::params::parse_param_name;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::ArrayD;

    /// Extracts a small hierarchical fit (two scalars plus an 8-vector) and
    /// checks shapes and cell placement across all parameters.
    #[test]
    fn test_extract_hierarchical_fit() {
        let num_schools = 8;
        let num_draws = 4;

        let mut names = vec!["mu".to_string(), "tau".to_string()];
        names.extend((1..=num_schools).map(|i| format!("theta[{i}]")));

        // Column for cell `i` of theta holds draws 10*i + s.
        let mut columns = vec![vec![0.1, 0.2, 0.3, 0.4], vec![1.0, 1.1, 1.2, 1.3]];
        columns.extend(
            (1..=num_schools)
                .map(|i| (0..num_draws).map(|s| (10 * i + s) as f64).collect()),
        );

        let fit = VbFit::new(names, columns);
        let samples = extract_vb_samples(&fit).unwrap();

        assert_eq!(samples.len(), 3, "Expected mu, tau and theta.");
        assert_eq!(samples["mu"].shape(), &[num_draws]);
        assert_eq!(samples["tau"].shape(), &[num_draws]);
        assert_eq!(samples["theta"].shape(), &[num_draws, num_schools]);

        let expected_mu = ArrayD::from_shape_vec(vec![4], vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_abs_diff_eq!(samples["mu"], expected_mu, epsilon = 1e-12);

        for i in 1..=num_schools {
            for s in 0..num_draws {
                let got = samples["theta"][[s, i - 1]];
                let want = (10 * i + s) as f64;
                assert_abs_diff_eq!(got, want, epsilon = 1e-12);
            }
        }
    }

    /// The reference reshaping example: two cells of `a`, out of order,
    /// interleave into a (3, 2) array.
    #[test]
    fn test_extract_matches_flat_layout() {
        let fit = VbFit::new(
            vec!["a[2]", "a[1]"],
            vec![vec![1.0, 3.0, 5.0], vec![0.0, 2.0, 4.0]],
        );
        let samples = extract_vb_samples(&fit).unwrap();
        let expected =
            ArrayD::from_shape_vec(vec![3, 2], (0..6).map(|v| v as f64).collect()).unwrap();
        assert_eq!(samples["a"], expected);
    }

    /// Extraction is generic over the element type; f32 columns work too.
    #[test]
    fn test_extract_f32_columns() {
        let fit = VbFit::new(vec!["b[1]", "b[2]"], vec![vec![1.5f32], vec![2.5f32]]);
        let samples = extract_vb_samples(&fit).unwrap();
        assert_eq!(samples["b"].shape(), &[1, 2]);
        assert_eq!(samples["b"][[0, 0]], 1.5);
        assert_eq!(samples["b"][[0, 1]], 2.5);
    }

    /// A draw-less fit keeps the trailing shape and a zero-length sample axis.
    #[test]
    fn test_extract_no_draws() {
        let fit: VbFit<f64> = VbFit::new(vec!["a[2,1]", "b", "a[1,1]"], vec![vec![], vec![], vec![]]);
        let samples = extract_vb_samples(&fit).unwrap();
        assert_eq!(samples["a"].shape(), &[0, 2, 1]);
        assert_eq!(samples["b"].shape(), &[0]);
    }

    /// A single malformed name poisons the whole extraction.
    #[test]
    fn test_extract_fails_on_first_bad_name() {
        let fit = VbFit::new(
            vec!["mu", "the ta[1]"],
            vec![vec![0.0], vec![1.0]],
        );
        let res = extract_vb_samples(&fit);
        assert_eq!(
            res,
            Err(ExtractError::InvalidParamName("the ta[1]".to_string()))
        );
    }

    /// Parser and extractor agree on what a valid name is.
    #[test]
    fn test_parse_roundtrips_through_extract() {
        let raw = "omega_12[3,1]";
        let (name, indices) = parse_param_name(raw).unwrap();
        assert_eq!(name, "omega_12");
        assert_eq!(indices, vec![3, 1]);

        let fit = VbFit::new(vec![raw], vec![vec![4.0, 2.0]]);
        let samples = extract_vb_samples(&fit).unwrap();
        assert_eq!(samples[&name].shape(), &[2, 3, 1]);
        assert_eq!(samples[&name][[0, 2, 0]], 4.0);
        assert_eq!(samples[&name][[1, 2, 0]], 2.0);
    }
}
