//! Scroll reveal threshold.

/// Whether a card whose top edge sits at `top` (viewport coordinates) is close
/// enough to be revealed. Non-finite geometry never reveals.
pub fn is_within_reveal_threshold(top: f64, viewport_height: f64, ratio: f64) -> bool {
    top.is_finite() && viewport_height.is_finite() && top < viewport_height * ratio
}

/// Indices of `tops` that pass [`is_within_reveal_threshold`].
pub fn reveal_candidates(tops: &[f64], viewport_height: f64, ratio: f64) -> Vec<usize> {
    tops.iter()
        .enumerate()
        .filter(|(_, top)| is_within_reveal_threshold(**top, viewport_height, ratio))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{is_within_reveal_threshold, reveal_candidates};

    #[test]
    fn threshold_is_strictly_below_ratio_of_viewport() {
        assert!(is_within_reveal_threshold(0.0, 1000.0, 0.9));
        assert!(is_within_reveal_threshold(899.0, 1000.0, 0.9));
        assert!(!is_within_reveal_threshold(900.0, 1000.0, 0.9));
        assert!(is_within_reveal_threshold(-250.0, 1000.0, 0.9));
        assert!(!is_within_reveal_threshold(f64::NAN, 1000.0, 0.9));
    }

    #[test]
    fn candidates_keep_card_order() {
        let tops = [0.0, 450.0, 900.0, 1350.0];
        assert_eq!(reveal_candidates(&tops, 1000.0, 0.9), vec![0, 1]);
    }
}
