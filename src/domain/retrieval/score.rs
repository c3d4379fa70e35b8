//! Distance-to-similarity mapping.
//!
//! The index stores cosine distance `d = 1 - cos(a, b)`, which lies in
//! [0, 2]. Scores are normalized as `similarity = 1 - d / 2`, so 1.0 is
//! identical and 0.0 maximally dissimilar, then rounded to 4 decimals.

/// Maps a cosine distance in [0, 2] to a similarity in [0, 1].
///
/// Out-of-range inputs (floating-point noise) are clamped.
pub fn similarity_from_cosine_distance(distance: f64) -> f64 {
    round_score((1.0 - distance / 2.0).clamp(0.0, 1.0))
}

/// Rounds a score to 4 decimal places.
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        assert_eq!(similarity_from_cosine_distance(0.0), 1.0);
    }

    #[test]
    fn opposite_vectors_score_zero() {
        assert_eq!(similarity_from_cosine_distance(2.0), 0.0);
    }

    #[test]
    fn orthogonal_vectors_score_half() {
        assert_eq!(similarity_from_cosine_distance(1.0), 0.5);
    }

    #[test]
    fn scores_are_rounded_to_four_decimals() {
        assert_eq!(similarity_from_cosine_distance(0.123456), 0.9383);
    }

    #[test]
    fn floating_noise_is_clamped() {
        assert_eq!(similarity_from_cosine_distance(-1e-9), 1.0);
        assert_eq!(similarity_from_cosine_distance(2.0 + 1e-9), 0.0);
    }
}
