use std::cell::Cell;

use approx::assert_relative_eq;
use chart_overlay::ChartError;
use chart_overlay::annotations::{
    Annotation, AnnotationId, AnnotationPresenter, Arrangeable, CartesianBandArranger, Side,
};
use chart_overlay::core::{
    AxisId, AxisPlotInfo, AxisRegistry, AxisType, AxisValue, ChartAxis, Rect, Size,
    ViewTransform,
};
use chrono::{TimeZone, Utc};

const X: AxisId = AxisId(1);
const Y: AxisId = AxisId(2);

struct FixedPresenter {
    size: Size,
    measured: Cell<usize>,
}

impl FixedPresenter {
    fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            measured: Cell::new(0),
        }
    }
}

impl AnnotationPresenter for FixedPresenter {
    fn measure_content(&self, _owner: AnnotationId, _content: Option<&str>) -> Size {
        self.measured.set(self.measured.get() + 1);
        self.size
    }

    fn refresh_node(&mut self, _node: AnnotationId) {}

    fn invalidate_palette(&mut self) {}

    fn collection_index(&self) -> usize {
        0
    }
}

fn numeric_axes(min: f64, max: f64) -> AxisRegistry {
    [
        ChartAxis::numerical(X, AxisType::First, min, max).expect("x axis"),
        ChartAxis::numerical(Y, AxisType::Second, min, max).expect("y axis"),
    ]
    .into_iter()
    .collect()
}

fn updated_point(axes: &AxisRegistry, x: f64, y: f64) -> Annotation {
    let mut point = Annotation::point(AnnotationId(1)).with_axes(X, Y);
    point.set_value(Side::First, x, axes).expect("x value");
    point.set_value(Side::Second, y, axes).expect("y value");
    assert!(point.is_updated());
    point
}

#[test]
fn point_rect_uses_zoomed_plot_area_and_pan() {
    let axes = numeric_axes(0.0, 100.0);
    let mut point = updated_point(&axes, 20.0, 60.0);
    let presenter = FixedPresenter::new(30.0, 15.0);
    let view = ViewTransform::new(10.0, 0.0, 2.0, 1.0);

    let rect = point
        .arrange(Rect::new(0.0, 0.0, 100.0, 50.0), &view, &presenter)
        .expect("arranged");

    assert_relative_eq!(rect.x, 50.0);
    assert_relative_eq!(rect.y, 20.0);
    assert_relative_eq!(rect.width, 30.0);
    assert_relative_eq!(rect.height, 15.0);
}

#[test]
fn band_on_first_axis_spans_full_plot_height() {
    let axes = numeric_axes(0.0, 100.0);
    let mut band = Annotation::band(AnnotationId(2)).with_axis(X);
    band.set_value(Side::FROM, 10.0, &axes).expect("from");
    band.set_value(Side::TO, 90.0, &axes).expect("to");

    let rect = band
        .arrange(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &ViewTransform::IDENTITY,
            &FixedPresenter::new(0.0, 0.0),
        )
        .expect("arranged");

    assert_eq!(rect, Rect::new(10.0, 0.0, 80.0, 100.0));
}

#[test]
fn band_on_second_axis_spans_full_layout_width() {
    let axes = numeric_axes(0.0, 10.0);
    let mut band = Annotation::band(AnnotationId(3)).with_axis(Y);
    band.set_value(Side::FROM, 2.0, &axes).expect("from");
    band.set_value(Side::TO, 8.0, &axes).expect("to");
    let layout = Rect::new(20.0, 10.0, 200.0, 100.0);
    let presenter = FixedPresenter::new(0.0, 0.0);

    let rect = band
        .arrange(layout, &ViewTransform::IDENTITY, &presenter)
        .expect("arranged");
    assert_relative_eq!(rect.x, 20.0);
    assert_relative_eq!(rect.y, 30.0);
    assert_relative_eq!(rect.width, 200.0);
    assert_relative_eq!(rect.height, 60.0);

    let zoomed = band
        .arrange(layout, &ViewTransform::new(0.0, 5.0, 1.0, 2.0), &presenter)
        .expect("arranged");
    assert_relative_eq!(zoomed.x, 20.0);
    assert_relative_eq!(zoomed.y, 55.0);
    assert_relative_eq!(zoomed.width, 200.0);
    assert_relative_eq!(zoomed.height, 120.0);
}

#[test]
fn reversed_band_values_still_produce_positive_extent() {
    let view = ViewTransform::IDENTITY;
    let layout = Rect::new(0.0, 0.0, 100.0, 100.0);
    let arranger = CartesianBandArranger::new(AxisType::First);

    let forward = arranger.arrange(
        AxisPlotInfo::linear(0.1),
        AxisPlotInfo::linear(0.9),
        layout,
        &view,
    );
    let reversed = arranger.arrange(
        AxisPlotInfo::linear(0.9),
        AxisPlotInfo::linear(0.1),
        layout,
        &view,
    );
    assert_eq!(forward, reversed);
    assert!(forward.width >= 0.0 && forward.height >= 0.0);
}

#[test]
fn arranging_before_update_is_rejected() {
    let axes = numeric_axes(0.0, 100.0);
    let mut point = Annotation::point(AnnotationId(4)).with_axes(X, Y);
    point.set_value(Side::First, 5.0, &axes).expect("x value");

    let err = point
        .arrange(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &ViewTransform::IDENTITY,
            &FixedPresenter::new(1.0, 1.0),
        )
        .expect_err("second side is unresolved");
    assert!(matches!(
        err,
        ChartError::NotUpdated {
            annotation: AnnotationId(4)
        }
    ));
}

#[test]
fn repeated_arrangement_is_idempotent_and_measures_once() {
    let axes = numeric_axes(0.0, 100.0);
    let mut point = updated_point(&axes, 50.0, 50.0);
    let presenter = FixedPresenter::new(12.0, 8.0);
    let layout = Rect::new(0.0, 0.0, 300.0, 200.0);
    let view = ViewTransform::new(3.0, -4.0, 1.5, 1.0);

    let first = point.arrange(layout, &view, &presenter).expect("first");
    let second = point.arrange(layout, &view, &presenter).expect("second");
    assert_eq!(first, second);
    assert_eq!(presenter.measured.get(), 1);

    point
        .set_content(Some("updated".to_owned()))
        .expect("content");
    point.arrange(layout, &view, &presenter).expect("third");
    assert_eq!(presenter.measured.get(), 2);
}

#[test]
fn category_slot_center_projects_onto_virtual_width() {
    let mut axes = AxisRegistry::new();
    axes.insert(ChartAxis::categorical(
        X,
        AxisType::First,
        ["a", "b", "c", "d"],
    ))
    .expect("categories");
    axes.insert(ChartAxis::numerical(Y, AxisType::Second, 0.0, 1.0).expect("y axis"))
        .expect("y");

    let mut point = Annotation::point(AnnotationId(5)).with_axes(X, Y);
    point
        .set_value(Side::First, AxisValue::category("c"), &axes)
        .expect("category");
    point.set_value(Side::Second, 1.0, &axes).expect("top");

    let rect = point
        .arrange(
            Rect::new(0.0, 0.0, 400.0, 100.0),
            &ViewTransform::IDENTITY,
            &FixedPresenter::new(0.0, 0.0),
        )
        .expect("arranged");
    assert_relative_eq!(rect.x, 250.0);
    assert_relative_eq!(rect.y, 0.0);
}

#[test]
fn date_value_resolves_against_date_time_axis() {
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("start");
    let end = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).single().expect("end");
    let noon = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).single().expect("noon");

    let mut axes = AxisRegistry::new();
    axes.insert(ChartAxis::date_time(X, AxisType::First, start, end).expect("date axis"))
        .expect("x");
    axes.insert(ChartAxis::numerical(Y, AxisType::Second, 0.0, 1.0).expect("y axis"))
        .expect("y");

    let mut point = Annotation::point(AnnotationId(6)).with_axes(X, Y);
    point.set_value(Side::First, noon, &axes).expect("date");
    point.set_value(Side::Second, 0.0, &axes).expect("bottom");

    let info = point.slot(Side::First).plot_info().expect("resolved");
    assert_relative_eq!(info.center_x(Rect::new(0.0, 0.0, 400.0, 1.0)), 200.0);

    let rect = point
        .arrange(
            Rect::new(0.0, 0.0, 400.0, 100.0),
            &ViewTransform::IDENTITY,
            &FixedPresenter::new(0.0, 0.0),
        )
        .expect("arranged");
    assert_relative_eq!(rect.x, 200.0);
    assert_relative_eq!(rect.y, 100.0);
}

#[test]
fn values_outside_the_axis_range_are_arranged_off_plot() {
    let axes = numeric_axes(0.0, 100.0);
    let mut point = updated_point(&axes, 150.0, -50.0);

    let rect = point
        .arrange(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &ViewTransform::IDENTITY,
            &FixedPresenter::new(4.0, 4.0),
        )
        .expect("arranged");
    assert_relative_eq!(rect.x, 150.0);
    assert_relative_eq!(rect.y, 150.0);
}
