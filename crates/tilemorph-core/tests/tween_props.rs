//! Property tests for tweens and easing curves.

use proptest::prelude::*;
use tilemorph_core::easing::{ease_in_out_cubic, ease_in_out_expo, linear};
use tilemorph_core::{Tween, Vec3, look_at};

fn arb_coord() -> impl Strategy<Value = f64> {
    -5_000.0f64..5_000.0
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (arb_coord(), arb_coord(), arb_coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn tween_stays_within_endpoints(
        from in arb_coord(),
        to in arb_coord(),
        duration in 1.0f64..5_000.0,
        frames in prop::collection::vec(0.0f64..6_000.0, 1..40),
    ) {
        let mut frames = frames;
        frames.sort_by(f64::total_cmp);
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        let mut tween = Tween::new(from, to, duration).easing(ease_in_out_expo);
        tween.advance(0.0);
        for now in frames {
            let v = tween.advance(now);
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9, "v={v} outside [{lo}, {hi}]");
        }
    }

    #[test]
    fn tween_lands_exactly_on_target(
        from in arb_vec3(),
        to in arb_vec3(),
        duration in 1.0f64..5_000.0,
        late in 0.0f64..1_000.0,
    ) {
        let mut tween = Tween::new(from, to, duration).easing(ease_in_out_cubic);
        tween.advance(100.0);
        tween.advance(100.0 + duration * 0.5);
        prop_assert_eq!(tween.advance(100.0 + duration + late), to);
        prop_assert!(tween.is_complete());
    }

    #[test]
    fn easing_curves_are_non_decreasing(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        for f in [linear, ease_in_out_cubic, ease_in_out_expo] {
            prop_assert!(f(lo) <= f(hi));
        }
    }

    #[test]
    fn look_at_is_always_finite(position in arb_vec3(), target in arb_vec3()) {
        prop_assert!(look_at(position, target).is_finite());
    }
}
