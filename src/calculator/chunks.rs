use super::error::{CalcError, CalcResult};

/// Number of fixed-size chunks needed to cover `repo_bytes`.
///
/// Refuses non-positive or non-finite chunk sizes instead of producing
/// `NaN`/`Infinity`, and refuses negative repository sizes.
pub fn chunk_count(repo_bytes: f64, chunk_bytes: f64) -> CalcResult<u64> {
    if !chunk_bytes.is_finite() || chunk_bytes <= 0.0 {
        return Err(CalcError::InvalidConfiguration(format!(
            "chunk size must be greater than zero (got {chunk_bytes} bytes)"
        )));
    }
    if !repo_bytes.is_finite() || repo_bytes < 0.0 {
        return Err(CalcError::InvalidConfiguration(format!(
            "repository size must be a non-negative number (got {repo_bytes} bytes)"
        )));
    }

    let chunks = (repo_bytes / chunk_bytes).ceil();
    // u64::MAX rounds up to 2^64 as f64, so anything at or above it saturates.
    if chunks >= u64::MAX as f64 {
        return Err(CalcError::InvalidConfiguration(format!(
            "chunk count overflows ({repo_bytes} bytes in {chunk_bytes}-byte chunks)"
        )));
    }

    Ok(chunks as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{GIB, KIB};

    #[test]
    fn test_exact_division() {
        assert_eq!(chunk_count(5.0 * GIB, 4.0 * KIB).unwrap(), 1_310_720);
    }

    #[test]
    fn test_partial_chunk_rounds_up() {
        assert_eq!(chunk_count(4097.0, 4096.0).unwrap(), 2);
        assert_eq!(chunk_count(1.0, 4096.0).unwrap(), 1);
    }

    #[test]
    fn test_empty_repo_has_no_chunks() {
        assert_eq!(chunk_count(0.0, 4096.0).unwrap(), 0);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err = chunk_count(GIB, 0.0).unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("chunk size"));
    }

    #[test]
    fn test_chunk_count_overflow_rejected() {
        let err = chunk_count(1e30, 1.0).unwrap_err();
        assert!(err.to_string().contains("overflows"));
        assert!(chunk_count(GIB, 1e-12).is_err());
    }

    #[test]
    fn test_negative_and_non_finite_rejected() {
        assert!(chunk_count(GIB, -4096.0).is_err());
        assert!(chunk_count(GIB, f64::NAN).is_err());
        assert!(chunk_count(-1.0, 4096.0).is_err());
        assert!(chunk_count(f64::INFINITY, 4096.0).is_err());
    }
}
