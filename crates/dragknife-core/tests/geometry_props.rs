//! Property tests for the geometric primitives

use dragknife_core::{
    distance, shift_from_end, shift_from_start, turn_angle, turn_direction, Point, TurnDirection,
};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn shifted_point_lies_at_requested_distance(
        p0 in point(),
        p1 in point(),
        length in 0.1..50.0f64,
    ) {
        prop_assume!(distance(p0, p1) > 1e-3);

        let start = shift_from_start(p0, p1, length).unwrap();
        prop_assert!((distance(p0, start) - length).abs() < 1e-6);

        let end = shift_from_end(p0, p1, length).unwrap();
        prop_assert!((distance(p1, end) - length).abs() < 1e-6);
        // continues past p1, away from p0
        prop_assert!(distance(p0, end) > distance(p0, p1));
    }

    #[test]
    fn turn_angle_stays_in_range(p0 in point(), p1 in point(), p2 in point()) {
        let angle = turn_angle(p0, p1, p2);
        prop_assert!(angle >= 0.0 && angle <= 180.0 + 1e-9);
    }

    #[test]
    fn mirroring_flips_strict_turns(p0 in point(), p1 in point(), p2 in point()) {
        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);
        prop_assume!(cross.abs() > 1e-6);

        let mirror = |p: Point| Point::new(p.x, -p.y);
        let original = turn_direction(p0, p1, p2);
        let mirrored = turn_direction(mirror(p0), mirror(p1), mirror(p2));
        prop_assert_ne!(original, mirrored);
    }

    #[test]
    fn reversed_path_has_same_angle(p0 in point(), p1 in point(), p2 in point()) {
        let forward = turn_angle(p0, p1, p2);
        let backward = turn_angle(p2, p1, p0);
        prop_assert!((forward - backward).abs() < 1e-9);
    }
}

#[test]
fn test_straight_line_turns_counter_clockwise() {
    let direction = turn_direction(
        Point::new(1.0, 1.0),
        Point::new(2.0, 2.0),
        Point::new(3.0, 3.0),
    );
    assert_eq!(direction, TurnDirection::CounterClockwise);
}
