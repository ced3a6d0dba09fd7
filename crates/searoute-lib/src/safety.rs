//! Route safety scoring.

use crate::hazard::Hazard;
use crate::segment::RouteSegment;

/// Upper bound on the summed hazard penalty.
pub const MAX_TOTAL_PENALTY: f64 = 0.80;

/// Penalty subtracted for each occurrence of `hazard`.
pub fn hazard_penalty(hazard: &Hazard) -> f64 {
    match hazard {
        Hazard::Storm => 0.30,
        Hazard::HighWaves => 0.20,
        Hazard::StrongCurrents => 0.15,
        Hazard::ShallowWater => 0.25,
        Hazard::Ice => 0.40,
        Hazard::PiracyRisk => 0.35,
        Hazard::CloseToLand | Hazard::HighWinds | Hazard::Other(_) => 0.10,
    }
}

/// Score a flat list of hazards: `1.0 - min(sum of penalties, 0.80)`,
/// clamped to [0, 1].
pub fn score_hazards<'a>(hazards: impl IntoIterator<Item = &'a Hazard>) -> f64 {
    let total: f64 = hazards.into_iter().map(hazard_penalty).sum();
    (1.0 - total.min(MAX_TOTAL_PENALTY)).clamp(0.0, 1.0)
}

/// Safety score of a route; 1.0 for a route with no hazards.
pub fn safety_score(segments: &[RouteSegment]) -> f64 {
    score_hazards(segments.iter().flat_map(|segment| segment.hazards.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_route_is_perfectly_safe() {
        assert_eq!(safety_score(&[]), 1.0);
    }

    #[test]
    fn penalties_accumulate_up_to_the_cap() {
        assert!((score_hazards(&[Hazard::Storm]) - 0.70).abs() < 1e-12);
        assert!((score_hazards(&[Hazard::HighWaves, Hazard::PiracyRisk]) - 0.45).abs() < 1e-12);
        let many = vec![Hazard::Ice; 5];
        assert!((score_hazards(&many) - 0.20).abs() < 1e-12);
        assert!((score_hazards(&[Hazard::Other("fog".into())]) - 0.90).abs() < 1e-12);
    }

    #[test]
    fn adding_a_hazard_never_raises_the_score() {
        let pool = [
            Hazard::Storm,
            Hazard::HighWaves,
            Hazard::StrongCurrents,
            Hazard::ShallowWater,
            Hazard::Ice,
            Hazard::PiracyRisk,
            Hazard::CloseToLand,
            Hazard::HighWinds,
            Hazard::Other("fog".into()),
        ];
        let mut hazards = Vec::new();
        let mut previous = score_hazards(&hazards);
        for step in 0..40 {
            hazards.push(pool[(step * 7) % pool.len()].clone());
            let score = score_hazards(&hazards);
            assert!(score <= previous, "score rose after adding {:?}", hazards.last());
            assert!((0.0..=1.0).contains(&score));
            previous = score;
        }
    }
}
