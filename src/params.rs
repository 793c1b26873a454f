//! Parsing of bracket-indexed parameter names as they appear in
//! variational-inference fit output, e.g. `"beta[4,3,2]"`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ExtractError;

lazy_static! {
    static ref PARAM_NAME_RE: Regex =
        Regex::new(r"^(?P<name>[a-zA-Z0-9_]+)(\[(?P<indices>\d+(,\s*\d+)*)\])?$")
            .expect("Expected the parameter name pattern to compile");
}

/// Splits a raw parameter name into its base name and 1-based bracket
/// indices. Scalar parameters come back with an empty index vector.
///
/// # Examples
///
/// ```rust
/// use vb_extract::params::parse_param_name;
///
/// let (name, indices) = parse_param_name("alpha[2,3]")?;
/// assert_eq!(name, "alpha");
/// assert_eq!(indices, vec![2, 3]);
///
/// let (name, indices) = parse_param_name("beta")?;
/// assert_eq!(name, "beta");
/// assert!(indices.is_empty());
/// # Ok::<(), vb_extract::error::ExtractError>(())
/// ```
///
/// # Errors
///
/// Returns [`ExtractError::InvalidParamName`] when the input does not match
/// the grammar: non-alphanumeric name characters, empty brackets, malformed
/// separators, or leading/trailing garbage.
pub fn parse_param_name(param_name: &str) -> Result<(String, Vec<usize>), ExtractError> {
    let caps = PARAM_NAME_RE
        .captures(param_name)
        .ok_or_else(|| ExtractError::InvalidParamName(param_name.to_string()))?;

    let indices = match caps.name("indices") {
        None => Vec::new(),
        Some(m) => m
            .as_str()
            .split(',')
            .map(|ix| ix.trim().parse())
            .collect::<Result<_, _>>()
            .map_err(|_| ExtractError::InvalidParamName(param_name.to_string()))?,
    };
    Ok((caps["name"].to_string(), indices))
}

#[test]
fn test_parse_scalar_name() {
    assert_eq!(
        parse_param_name("alpha").unwrap(),
        ("alpha".to_string(), vec![])
    );
    assert_eq!(
        parse_param_name("alpha_prime").unwrap(),
        ("alpha_prime".to_string(), vec![])
    );
}

#[test]
fn test_parse_single_index() {
    assert_eq!(
        parse_param_name("beta[2]").unwrap(),
        ("beta".to_string(), vec![2])
    );
}

#[test]
fn test_parse_multi_index() {
    assert_eq!(
        parse_param_name("beta[4,3,2]").unwrap(),
        ("beta".to_string(), vec![4, 3, 2])
    );
    assert_eq!(
        parse_param_name("beta_prime[4,3,2]").unwrap(),
        ("beta_prime".to_string(), vec![4, 3, 2])
    );
}

#[test]
fn test_parse_whitespace_after_commas() {
    assert_eq!(
        parse_param_name("gamma[1, 2,  3]").unwrap(),
        ("gamma".to_string(), vec![1, 2, 3])
    );
}

#[test]
fn test_parse_rejects_malformed_names() {
    for bad in ["a-b", "$a", "*", "", "ae[]"] {
        let res = parse_param_name(bad);
        assert_eq!(
            res,
            Err(ExtractError::InvalidParamName(bad.to_string())),
            "Expected parsing {bad:?} to fail, got {res:?}."
        );
    }
}

#[test]
fn test_parse_rejects_partial_matches() {
    // The grammar is anchored: the whole string has to match.
    for bad in ["a[1] ", " a[1]", "a[1]b", "a[1", "a1]", "a[1,]", "a[,1]", "a[1 ,2]"] {
        assert!(
            parse_param_name(bad).is_err(),
            "Expected parsing {bad:?} to fail."
        );
    }
}
