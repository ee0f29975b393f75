use chart_overlay::core::{Point, Rect, Size};
use chart_overlay::tooltip::{
    PlacementSide, PointerConfig, PointerEdge, PointerLayout, TooltipPlacement,
};

const BOUNDS: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);
const BOX: Size = Size::new(100.0, 40.0);

#[test]
fn vertical_placement_prefers_above() {
    let placement =
        TooltipPlacement::resolve(Point::new(200.0, 150.0), BOX, BOUNDS, true, 6.0)
            .expect("placement");
    assert_eq!(placement.side, PlacementSide::Above);
    assert_eq!(placement.location, Point::new(150.0, 104.0));
    assert!(placement.fits);
}

#[test]
fn vertical_placement_falls_back_below_near_the_top_edge() {
    let placement =
        TooltipPlacement::resolve(Point::new(200.0, 20.0), BOX, BOUNDS, true, 6.0)
            .expect("placement");
    assert_eq!(placement.side, PlacementSide::Below);
    assert_eq!(placement.location, Point::new(150.0, 26.0));
    assert!(placement.fits);
}

#[test]
fn cross_axis_is_clamped_into_bounds() {
    let placement =
        TooltipPlacement::resolve(Point::new(10.0, 150.0), BOX, BOUNDS, true, 6.0)
            .expect("placement");
    assert_eq!(placement.location, Point::new(0.0, 104.0));

    let placement =
        TooltipPlacement::resolve(Point::new(395.0, 150.0), BOX, BOUNDS, true, 6.0)
            .expect("placement");
    assert_eq!(placement.location, Point::new(300.0, 104.0));
}

#[test]
fn horizontal_placement_prefers_right_then_left() {
    let right = TooltipPlacement::resolve(Point::new(50.0, 150.0), BOX, BOUNDS, false, 6.0)
        .expect("placement");
    assert_eq!(right.side, PlacementSide::Right);
    assert_eq!(right.location, Point::new(56.0, 130.0));

    let left = TooltipPlacement::resolve(Point::new(350.0, 150.0), BOX, BOUNDS, false, 6.0)
        .expect("placement");
    assert_eq!(left.side, PlacementSide::Left);
    assert_eq!(left.location, Point::new(244.0, 130.0));
    assert!(left.fits);
}

#[test]
fn no_fitting_side_takes_first_least_overflowing_candidate() {
    let bounds = Rect::new(0.0, 0.0, 120.0, 60.0);
    let placement =
        TooltipPlacement::resolve(Point::new(60.0, 30.0), BOX, bounds, true, 6.0)
            .expect("placement");
    assert!(!placement.fits);
    assert_eq!(placement.side, PlacementSide::Above);
    assert_eq!(placement.location, Point::new(10.0, -16.0));
}

#[test]
fn invalid_inputs_are_rejected() {
    let target = Point::new(10.0, 10.0);
    assert!(TooltipPlacement::resolve(target, BOX, Rect::new(0.0, 0.0, 0.0, 10.0), true, 6.0)
        .is_err());
    assert!(TooltipPlacement::resolve(target, BOX, BOUNDS, true, -1.0).is_err());
    assert!(
        TooltipPlacement::resolve(Point::new(f64::NAN, 0.0), BOX, BOUNDS, true, 6.0).is_err()
    );
    assert!(
        TooltipPlacement::resolve(target, Size::new(-5.0, 5.0), BOUNDS, true, 6.0).is_err()
    );
}

#[test]
fn placed_layout_points_back_at_target() {
    let mut layout = PointerLayout::from_config(&PointerConfig::default()).expect("layout");
    layout.measure(BOX).expect("measure");

    let target = Point::new(200.0, 150.0);
    let placement = layout.place_near(target, BOUNDS, 6.0).expect("placed");
    assert_eq!(placement.side, PlacementSide::Above);
    assert_eq!(layout.container_location(), Point::new(150.0, 104.0));
    assert_eq!(layout.target_location(), target);

    let path = layout.pointer_path().expect("pointer");
    assert_eq!(path.edge(), PointerEdge::Bottom);
    let tip = path.translated(layout.container_location()).tip();
    assert_eq!(tip, Point::new(200.0, 140.0));
}
