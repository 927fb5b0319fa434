use super::*;

fn line_trace(n: usize) -> Trace {
    Trace {
        points: (0..n)
            .map(|i| TracePoint::new(20 + (i % 900) as i32, 100 + (i % 7) as i32))
            .collect(),
        seed: 77,
    }
}

fn mood(intensity: f64, calm: f64) -> NormalizedFeatures {
    NormalizedFeatures { intensity, calm }
}

fn widths(plan: &StrokePlan) -> Vec<f64> {
    plan.ops.iter().filter_map(DrawOp::stroke_width).collect()
}

#[test]
fn short_traces_become_placeholders() {
    for n in [0, 1] {
        let plan = compile_strokes(
            &line_trace(n),
            StyleVariant::Bold,
            &mood(0.6, 0.5),
            Canvas::default(),
        );
        assert_eq!(plan.content, ImageContent::InsufficientTrace);
        assert_eq!(plan.ops.len(), 2);
        assert!(matches!(
            plan.ops[0],
            DrawOp::Fill {
                paint: Paint::Alert,
                ..
            }
        ));
        match &plan.ops[1] {
            DrawOp::Text {
                text,
                center,
                size,
                paint,
            } => {
                assert_eq!(text, PLACEHOLDER_MESSAGE);
                assert_eq!(*paint, Paint::Alert);
                assert_eq!(*size, 24.0);
                assert_eq!(*center, Point::new(500.0, 319.0));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }
}

#[test]
fn placeholder_label_sits_above_the_bar_on_small_canvases() {
    let canvas = Canvas::new(100, 60).unwrap();
    let plan = compile_strokes(&line_trace(0), StyleVariant::Bold, &mood(0.0, 0.0), canvas);
    match &plan.ops[1] {
        DrawOp::Text { center, size, .. } => {
            assert_eq!(*size, 8.0);
            assert_eq!(*center, Point::new(50.0, 21.0));
        }
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn default_caption_adds_nothing() {
    let plan = compile_strokes(
        &line_trace(50),
        StyleVariant::Solitary,
        &mood(0.1, 0.8),
        Canvas::default(),
    );
    assert!(Caption::default().is_empty());
    let captioned = plan.clone().with_caption(&Caption::default());
    assert_eq!(captioned, plan);
    assert!(!captioned.has_text());

    let blank = Caption {
        title: Some("   ".to_string()),
        timestamp: Some(String::new()),
    };
    assert!(blank.is_empty());
    assert_eq!(plan.clone().with_caption(&blank), plan);
}

#[test]
fn caption_puts_title_on_top_and_timestamp_at_the_bottom() {
    let caption = Caption {
        title: Some("Thought trace".to_string()),
        timestamp: Some("15/10/2026 - 09:30:00".to_string()),
    };
    let plan = compile_strokes(
        &line_trace(50),
        StyleVariant::Solitary,
        &mood(0.1, 0.8),
        Canvas::default(),
    )
    .with_caption(&caption);

    assert_eq!(plan.ops.len(), 3);
    assert_eq!(plan.content, ImageContent::Trace(StyleVariant::Solitary));
    let texts: Vec<_> = plan.ops.iter().filter_map(DrawOp::text).collect();
    assert_eq!(texts, ["Thought trace", "15/10/2026 - 09:30:00"]);
    match (&plan.ops[1], &plan.ops[2]) {
        (
            DrawOp::Text {
                center: title_at,
                paint: title_paint,
                ..
            },
            DrawOp::Text {
                center: stamp_at,
                size: stamp_size,
                ..
            },
        ) => {
            assert_eq!(*title_at, Point::new(500.0, 30.0));
            assert_eq!(*title_paint, Paint::INK);
            assert_eq!(*stamp_at, Point::new(500.0, 680.0));
            assert_eq!(*stamp_size, 12.0);
        }
        other => panic!("expected two text ops, got {other:?}"),
    }
}

#[test]
fn solitary_is_one_faint_thin_stroke() {
    let plan = compile_strokes(
        &line_trace(50),
        StyleVariant::Solitary,
        &mood(0.1, 0.8),
        Canvas::default(),
    );
    assert_eq!(plan.content, ImageContent::Trace(StyleVariant::Solitary));
    assert_eq!(plan.ops.len(), 1);
    match &plan.ops[0] {
        DrawOp::Stroke { width, paint, path } => {
            assert_eq!(*width, 1.0);
            assert_eq!(*paint, Paint::Ink { alpha: 219 });
            assert_eq!(path.elements().len(), 50);
        }
        other => panic!("expected stroke, got {other:?}"),
    }
}

#[test]
fn bold_tapers_over_the_last_fifth_when_calm_is_low() {
    let plan = compile_strokes(
        &line_trace(100),
        StyleVariant::Bold,
        &mood(0.6, 0.45),
        Canvas::default(),
    );
    let w = widths(&plan);
    assert_eq!(w.len(), 99);
    // trunc(5 + 4.8 - 0.9) = 8
    assert!(w[..=80].iter().all(|&x| x == 8.0));
    assert!(w[81] < 8.0);
    assert!(w.iter().all(|&x| x >= 1.0));
    assert!(w.windows(2).skip(80).all(|p| p[1] <= p[0]));
}

#[test]
fn bold_keeps_full_width_when_calm_is_high() {
    let plan = compile_strokes(
        &line_trace(100),
        StyleVariant::Bold,
        &mood(0.9, 0.9),
        Canvas::default(),
    );
    // trunc(5 + 7.2 - 1.8) = 10
    assert!(widths(&plan).iter().all(|&x| x == 10.0));
}

#[test]
fn organic_widths_follow_mood_then_taper() {
    let plan = compile_strokes(
        &line_trace(100),
        StyleVariant::OrganicBase,
        &mood(0.45, 0.0),
        Canvas::default(),
    );
    let w = widths(&plan);
    assert_eq!(w.len(), 99);
    // trunc(2 * (1 + 1.35)) = 4
    assert!(w[..=70].iter().all(|&x| x == 4.0));
    // Past 70% the reduction is scaled by (1 + 2 * unrest) = 3, so it starts thicker.
    assert_eq!(w[71], 11.0);
    assert_eq!(w[98], 1.0);
}

#[test]
fn organic_width_floors_at_one() {
    let plan = compile_strokes(
        &line_trace(10),
        StyleVariant::OrganicBase,
        &mood(0.0, 1.0),
        Canvas::default(),
    );
    assert!(widths(&plan).iter().all(|&x| x == 1.0));
}

#[test]
fn fragmented_dashes_leave_gaps() {
    let trace = line_trace(400);
    let plan = compile_strokes(
        &trace,
        StyleVariant::Fragmented,
        &mood(0.4, 0.2),
        Canvas::default(),
    );
    assert!(plan.ops.len() > 5);
    let drawn: usize = plan
        .ops
        .iter()
        .map(|op| match op {
            DrawOp::Stroke { path, width, .. } => {
                assert_eq!(*width, 2.0);
                path.elements().len() - 1
            }
            DrawOp::Fill { .. } | DrawOp::Text { .. } => panic!("dashes are strokes"),
        })
        .sum();
    assert!(drawn < trace.len() - 1);
}

#[test]
fn scattered_emits_5_to_14_dots_per_point() {
    let trace = line_trace(60);
    let plan = compile_strokes(
        &trace,
        StyleVariant::Scattered,
        &mood(0.9, 0.1),
        Canvas::default(),
    );
    assert!(plan.ops.len() >= 5 * 60);
    assert!(plan.ops.len() <= 14 * 60);
    assert!(plan.ops.iter().all(|op| matches!(op, DrawOp::Fill { .. })));
}

#[test]
fn render_randomness_is_seeded_by_the_trace() {
    let trace = line_trace(120);
    let m = mood(0.9, 0.1);
    let a = compile_strokes(&trace, StyleVariant::Scattered, &m, Canvas::default());
    let b = compile_strokes(&trace, StyleVariant::Scattered, &m, Canvas::default());
    assert_eq!(a, b);

    let mut other = trace.clone();
    other.seed += 1;
    let c = compile_strokes(&other, StyleVariant::Scattered, &m, Canvas::default());
    assert_ne!(a, c);
}
