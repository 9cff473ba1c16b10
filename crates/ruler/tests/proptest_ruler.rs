//! Property-based tests for the ruler state machine
//!
//! Validates:
//! - The phase is the count of hits since the last miss, modulo 3
//! - A distance is exposed only in the second phase and matches the points

use glam::Vec3;
use holosnap_ruler::{Ruler, RulerState};
use proptest::prelude::*;

fn sample() -> impl Strategy<Value = Option<Vec3>> {
    prop_oneof![
        1 => Just(None),
        4 => (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0)
            .prop_map(|(x, y, z)| Some(Vec3::new(x, y, z))),
    ]
}

proptest! {
    #[test]
    fn phase_tracks_hits_since_last_miss(samples in prop::collection::vec(sample(), 0..40)) {
        let mut ruler = Ruler::new();
        let mut streak = 0usize;
        for s in &samples {
            ruler.capture(*s);
            streak = if s.is_some() { streak + 1 } else { 0 };

            let expected = match streak % 3 {
                0 => "idle",
                1 => "first",
                _ => "second",
            };
            prop_assert_eq!(ruler.state().as_str(), expected);
        }
    }

    #[test]
    fn distance_only_in_second_phase(samples in prop::collection::vec(sample(), 0..40)) {
        let mut ruler = Ruler::new();
        for s in samples {
            let state = ruler.capture(s);
            match state {
                RulerState::Second { p1, p2 } => {
                    let segment = ruler.segment().expect("segment while second");
                    prop_assert_eq!(segment.start, p1);
                    prop_assert_eq!(segment.end, p2);
                    prop_assert!((segment.distance - (p2 - p1).length()).abs() < 1e-4);
                }
                _ => prop_assert!(ruler.distance().is_none()),
            }
        }
    }
}
