use chart_overlay::annotations::{AnnotationId, GridTextPresenter, Side, TextMetrics};
use chart_overlay::core::{AxisId, AxisType, ChartAxis, Point, Size, StaticView, Viewport};
use chart_overlay::render::NullRenderer;
use chart_overlay::tooltip::PointerLayout;
use chart_overlay::{AnnotationLayer, OverlayConfig};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const X: AxisId = AxisId(1);
const Y: AxisId = AxisId(2);

fn populated_layer(points: u32) -> (AnnotationLayer, GridTextPresenter) {
    let mut layer: AnnotationLayer =
        AnnotationLayer::new(OverlayConfig::new(Viewport::new(1920, 1080))).expect("valid layer");
    layer
        .add_axis(ChartAxis::numerical(X, AxisType::First, 0.0, 10_000.0).expect("x axis"))
        .expect("add x");
    layer
        .add_axis(ChartAxis::numerical(Y, AxisType::Second, 0.0, 2_500.0).expect("y axis"))
        .expect("add y");

    let mut presenter = GridTextPresenter::new(TextMetrics::default()).expect("presenter");
    for i in 0..points {
        let id = AnnotationId(i);
        let t = f64::from(i);
        layer.add_point(id, X, Y).expect("add point");
        layer
            .set_content(id, Some(format!("bar {i}")), &mut presenter)
            .expect("content");
        layer
            .set_value(id, Side::First, t, &mut presenter)
            .expect("x value");
        layer
            .set_value(id, Side::Second, 100.0 + t * 0.05, &mut presenter)
            .expect("y value");
    }
    (layer, presenter)
}

fn bench_layout_pass_1k(c: &mut Criterion) {
    let (mut layer, presenter) = populated_layer(1_000);
    let mut view = StaticView::new(1920.0, 1080.0);
    view.zoom_to(2.0, 1.0);

    c.bench_function("annotation_layout_pass_1k", |b| {
        b.iter(|| {
            layer.reset_state();
            let _ = layer
                .layout_pass(black_box(&view), &presenter)
                .expect("layout pass");
        })
    });
}

fn bench_render_with_pointer_1k(c: &mut Criterion) {
    let (mut layer, presenter) = populated_layer(1_000);
    let view = StaticView::new(1920.0, 1080.0);
    let mut renderer = NullRenderer::default();
    let mut pointer = layer.pointer_layout().expect("pointer layout");
    pointer.measure(Size::new(120.0, 48.0)).expect("measure");
    pointer
        .place_near(Point::new(960.0, 540.0), Viewport::new(1920, 1080).bounds(), 6.0)
        .expect("placed");

    c.bench_function("annotation_render_with_pointer_1k", |b| {
        b.iter(|| {
            let _ = layer
                .render(&mut renderer, black_box(&view), &presenter, Some(&pointer))
                .expect("render");
        })
    });
}

fn bench_pointer_path(c: &mut Criterion) {
    let mut pointer = PointerLayout::new();
    pointer.set_pointer_size(8);
    pointer.set_tooltip_margin(4);
    pointer.measure(Size::new(120.0, 48.0)).expect("measure");

    c.bench_function("tooltip_pointer_path", |b| {
        b.iter(|| {
            pointer.set_target_location(black_box(Point::new(75.0, 200.0)));
            let _ = pointer.pointer_path();
        })
    });
}

criterion_group!(
    benches,
    bench_layout_pass_1k,
    bench_render_with_pointer_1k,
    bench_pointer_path
);
criterion_main!(benches);
