use chart_overlay::ChartError;
use chart_overlay::core::{Insets, Point, Size};
use chart_overlay::tooltip::{PointerConfig, PointerEdge, PointerLayout};

fn layout(pointer_size: u32, width: f64, height: f64) -> PointerLayout {
    let mut layout = PointerLayout::new();
    layout.set_pointer_size(pointer_size);
    layout.measure(Size::new(width, height)).expect("measure");
    layout
}

#[test]
fn zero_sized_pointer_draws_nothing() {
    let layout = layout(0, 100.0, 50.0);
    assert!(layout.pointer_path().is_none());
}

#[test]
fn pointer_size_changes_grow_padding_by_absolute_delta() {
    let mut layout = PointerLayout::new();
    layout.set_pointer_size(10);
    assert_eq!(layout.padding(), Insets::uniform(10.0));

    layout.set_pointer_size(4);
    assert_eq!(layout.padding(), Insets::uniform(16.0));

    layout.set_pointer_size(4);
    assert_eq!(layout.padding(), Insets::uniform(16.0));
    assert!(layout.padding().is_uniform());
}

#[test]
fn config_seeds_padding_before_size_and_margin() {
    let config = PointerConfig {
        pointer_size: 8,
        pointer_margin: 4,
        align_vertically: false,
        base_padding: 2.0,
    };
    let layout = PointerLayout::from_config(&config).expect("layout");

    assert_eq!(layout.padding(), Insets::uniform(14.0));
    assert_eq!(layout.pointer_size(), 8);
    assert_eq!(layout.tooltip_margin(), 4);
    assert!(!layout.align_vertically());
    assert!(!layout.is_padding_change_scheduled());
}

#[test]
fn padding_writes_need_a_scheduled_change() {
    let mut layout = PointerLayout::new();
    let err = layout
        .set_padding(Insets::uniform(5.0))
        .expect_err("latch is disarmed");
    assert!(matches!(err, ChartError::PaddingLocked));

    layout.schedule_padding_change();
    assert!(layout.is_padding_change_scheduled());
    layout.set_padding(Insets::uniform(5.0)).expect("armed");
    assert_eq!(layout.padding(), Insets::uniform(5.0));
}

#[test]
fn vertical_pointer_below_box_aims_at_target() {
    let mut layout = layout(10, 100.0, 50.0);
    layout.set_target_location(Point::new(50.0, 80.0));

    let path = layout.pointer_path().expect("pointer");
    assert_eq!(path.edge(), PointerEdge::Bottom);
    assert_eq!(path.base(), (Point::new(40.0, 40.0), Point::new(60.0, 40.0)));
    assert_eq!(path.tip(), Point::new(50.0, 50.0));
}

#[test]
fn vertical_pointer_above_box_points_up() {
    let mut layout = layout(10, 100.0, 50.0);
    layout.set_target_location(Point::new(50.0, -30.0));

    let path = layout.pointer_path().expect("pointer");
    assert_eq!(path.edge(), PointerEdge::Top);
    assert_eq!(path.tip(), Point::new(50.0, 0.0));
    assert_eq!(path.base(), (Point::new(40.0, 10.0), Point::new(60.0, 10.0)));
}

#[test]
fn vertical_anchor_is_clamped_inside_padding() {
    let mut layout = layout(10, 100.0, 50.0);
    layout.set_target_location(Point::new(-20.0, 80.0));

    let path = layout.pointer_path().expect("pointer");
    assert_eq!(path.tip().x, 10.0);
    assert_eq!(path.base(), (Point::new(10.0, 40.0), Point::new(20.0, 40.0)));

    layout.set_target_location(Point::new(15.0, 80.0));
    let path = layout.pointer_path().expect("pointer");
    let (start, end) = path.base();
    assert_eq!(start, Point::new(10.0, 40.0));
    assert_eq!(end, Point::new(25.0, 40.0));
}

#[test]
fn horizontal_pointer_right_of_box() {
    let mut layout = layout(10, 100.0, 60.0);
    layout.set_align_vertically(false);
    layout.set_target_location(Point::new(150.0, 20.0));

    let path = layout.pointer_path().expect("pointer");
    assert_eq!(path.edge(), PointerEdge::Right);
    assert_eq!(path.tip(), Point::new(100.0, 20.0));
    assert_eq!(path.base(), (Point::new(90.0, 10.0), Point::new(90.0, 30.0)));
}

#[test]
fn horizontal_pointer_left_of_box_clamps_to_lower_half() {
    let mut layout = layout(10, 100.0, 60.0);
    layout.set_align_vertically(false);
    layout.set_target_location(Point::new(-40.0, 55.0));

    let path = layout.pointer_path().expect("pointer");
    assert_eq!(path.edge(), PointerEdge::Left);
    assert_eq!(path.tip(), Point::new(0.0, 50.0));
    assert_eq!(path.base(), (Point::new(10.0, 40.0), Point::new(10.0, 50.0)));
}

#[test]
fn pointer_follows_container_location() {
    let mut layout = layout(6, 80.0, 30.0);
    layout.set_container_location(Point::new(100.0, 100.0));
    layout.set_target_location(Point::new(140.0, 150.0));

    let path = layout.pointer_path().expect("pointer");
    assert_eq!(path.edge(), PointerEdge::Bottom);
    assert_eq!(path.tip(), Point::new(40.0, 30.0));

    let translated = path.translated(layout.container_location());
    assert_eq!(translated.tip(), Point::new(140.0, 130.0));
    assert_eq!(translated.edge(), PointerEdge::Bottom);
}

#[test]
fn invalid_measurement_is_rejected() {
    let mut layout = PointerLayout::new();
    assert!(layout.measure(Size::new(-1.0, 10.0)).is_err());
    assert!(layout.measure(Size::new(f64::NAN, 10.0)).is_err());
}
