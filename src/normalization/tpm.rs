use thiserror::Error;

use super::LengthPolicy;

#[derive(Debug, Error, Eq, PartialEq)]
#[error("unusable length at index {0}")]
pub struct UnusableLengthError(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
enum Rate {
    Defined(f64),
    Zero,
    Undefined,
}

/// Calculates transcripts per million (TPM) for a single sample.
///
/// `lengths` and `counts` must be aligned by gene. A missing count or length yields a missing
/// TPM. Genes with an unusable length (zero, negative, or non-finite) are handled by
/// `length_policy`. A non-finite count yields a missing TPM. None of these contribute to the
/// scaling factor.
pub fn normalize(
    lengths: &[Option<f64>],
    counts: &[Option<f64>],
    length_policy: LengthPolicy,
) -> Result<Vec<Option<f64>>, UnusableLengthError> {
    debug_assert_eq!(lengths.len(), counts.len());

    let length_normalized_counts: Vec<_> = lengths
        .iter()
        .zip(counts)
        .enumerate()
        .map(|(i, (length, count))| match (*length, *count) {
            (Some(length), Some(count)) if is_usable_length(length) => {
                let n = count / length;

                if n.is_finite() {
                    Ok(Rate::Defined(n))
                } else {
                    Ok(Rate::Undefined)
                }
            }
            (Some(_), Some(_)) => match length_policy {
                LengthPolicy::Missing => Ok(Rate::Undefined),
                LengthPolicy::Zero => Ok(Rate::Zero),
                LengthPolicy::Error => Err(UnusableLengthError(i)),
            },
            _ => Ok(Rate::Undefined),
        })
        .collect::<Result<_, _>>()?;

    let sum: f64 = length_normalized_counts
        .iter()
        .filter_map(|rate| match rate {
            Rate::Defined(n) => Some(n),
            _ => None,
        })
        .sum();

    let tpms = length_normalized_counts
        .into_iter()
        .map(|rate| match rate {
            Rate::Defined(n) => Some(calculate_tpm(n, sum)).filter(|tpm| tpm.is_finite()),
            Rate::Zero => Some(0.0),
            Rate::Undefined => None,
        })
        .collect();

    Ok(tpms)
}

fn is_usable_length(length: f64) -> bool {
    length.is_finite() && length > 0.0
}

fn calculate_tpm(n: f64, sum: f64) -> f64 {
    n * 1e6 / sum
}
