//! Travelling-dash pattern for link strokes.

use super::style::{DASH_LEN, DASH_PERIOD_MS, GAP_LEN};

/// Cycle progress in `[0, 1)` after `elapsed_ms` of animation.
pub fn phase(elapsed_ms: f64) -> f64 {
	elapsed_ms.rem_euclid(DASH_PERIOD_MS) / DASH_PERIOD_MS
}

/// Four-segment line dash for the given phase.
///
/// The first half grows a gap in front of the dash while shrinking the trailing
/// gap; the second half splits the dash across the wrap so the segment appears
/// to slide continuously along the line. Every pattern spans `DASH_LEN + GAP_LEN`.
pub fn pattern(t: f64) -> [f64; 4] {
	if t < 0.5 {
		[0.0, GAP_LEN * t * 2.0, DASH_LEN, GAP_LEN * (1.0 - t * 2.0)]
	} else {
		let u = (t - 0.5) * 2.0;
		[DASH_LEN * u, GAP_LEN, DASH_LEN * (1.0 - u), 0.0]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn approx(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-6
	}

	#[test]
	fn phase_wraps_each_period() {
		assert!(approx(phase(0.0), 0.0));
		assert!(approx(phase(100.0), 0.25));
		assert!(approx(phase(400.0), 0.0));
		assert!(approx(phase(1300.0), 0.25));
	}

	#[test]
	fn pattern_keeps_total_length() {
		for i in 0..40 {
			let t = i as f64 / 40.0;
			let sum: f64 = pattern(t).iter().sum();
			assert!(approx(sum, DASH_LEN + GAP_LEN), "t={t} sum={sum}");
		}
	}

	#[test]
	fn pattern_is_continuous_at_half_and_wrap() {
		let start = pattern(0.0);
		assert_eq!(start, [0.0, 0.0, DASH_LEN, GAP_LEN]);

		let before = pattern(0.5 - 1e-9);
		let after = pattern(0.5);
		// Both render as a full dash followed by a full gap.
		assert!(approx(before[1], GAP_LEN));
		assert!(approx(before[3], 0.0));
		assert_eq!(after, [0.0, GAP_LEN, DASH_LEN, 0.0]);

		let end = pattern(1.0 - 1e-9);
		assert!(approx(end[0], DASH_LEN));
		assert!(approx(end[2], 0.0));
	}
}
