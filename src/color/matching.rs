//! Perceptual match scoring between the mixed color and a target.

use super::convert::{delta_e94, rgb_to_lab};
use super::parse::Rgb;

/// Perceptual match between the mixed color and the target, as
/// `100 - ΔE94(lab(mixed), lab(target))`.
///
/// The operand order is fixed: the mixed color is the ΔE94 reference, so the
/// formula's SC/SH weights derive from its chroma. The score is deliberately
/// not clamped — wildly dissimilar colors score negative, and it is the
/// display layer's business to floor that at 0.
///
/// A missing operand (empty mix, no target set) scores 0. That is a display
/// convenience for the common "nothing to compare yet" state, not an error
/// path.
pub fn match_percentage(mixed: Option<Rgb>, target: Option<Rgb>) -> f64 {
    let (Some(mixed), Some(target)) = (mixed, target) else {
        return 0.0;
    };
    100.0 - delta_e94(rgb_to_lab(mixed), rgb_to_lab(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_matches_itself_at_100() {
        let color = Rgb::new(137, 164, 210);
        assert_eq!(match_percentage(Some(color), Some(color)), 100.0);
    }

    #[test]
    fn missing_operands_score_zero() {
        let color = Rgb::new(10, 20, 30);
        assert_eq!(match_percentage(None, Some(color)), 0.0);
        assert_eq!(match_percentage(Some(color), None), 0.0);
        assert_eq!(match_percentage(None, None), 0.0);
    }

    #[test]
    fn distant_colors_can_score_negative() {
        // A neutral mix keeps SC/SH at 1, so a saturated target sits well
        // over 100 ΔE94 units away and the raw score goes below zero.
        let score = match_percentage(Some(Rgb::new(255, 255, 255)), Some(Rgb::new(0, 0, 255)));
        assert!(score < 0.0, "score = {score}");
    }

    #[test]
    fn near_colors_score_high() {
        let score = match_percentage(Some(Rgb::new(100, 150, 200)), Some(Rgb::new(101, 151, 201)));
        assert!(score > 99.0, "score = {score}");
        assert!(score <= 100.0);
    }

    #[test]
    fn operand_order_matters() {
        let vivid = Rgb::new(255, 40, 40);
        let dull = Rgb::new(120, 110, 110);
        let forward = match_percentage(Some(vivid), Some(dull));
        let backward = match_percentage(Some(dull), Some(vivid));
        assert_ne!(forward, backward);
    }
}
