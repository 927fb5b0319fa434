use super::*;
use crate::foundation::core::Rgb8;
use crate::render::ImageContent;

fn small_config() -> TraceConfig {
    TraceConfig {
        width: 240,
        height: 180,
        ..TraceConfig::default()
    }
}

#[test]
fn interpretation_is_consistent_end_to_end() {
    let it = interpret("¡Sí! ¡Vamos! ¡Ahora!", Canvas::default()).unwrap();
    assert_eq!(it.features.exclamation_count, 3);
    assert!((it.mood.intensity - 0.45).abs() < 1e-12);
    assert_eq!(it.plan.mood, it.mood);
    assert_eq!(it.style, StyleVariant::OrganicBase);
    assert_eq!(it.trace.len() as u64, it.plan.total_points());
    assert_eq!(it.trace.seed, it.features.seed);
}

#[test]
fn generate_trace_uses_requested_dimensions() {
    let img = generate_trace("Hoy el río suena tranquilo.", 320, 200).unwrap();
    assert_eq!((img.width, img.height), (320, 200));
    assert_eq!(img.data.len(), 320 * 200 * 3);
    assert!(img.painted_pixels(Rgb8::PAPER) > 0);
}

#[test]
fn default_dimensions_are_1000_by_700() {
    let img = generate_trace("", DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap();
    assert_eq!((img.width, img.height), (1000, 700));
    assert_eq!(img.content, ImageContent::Trace(StyleVariant::OrganicBase));
}

#[test]
fn non_positive_canvas_is_a_caller_error() {
    let err = generate_trace("hola", 0, 700).unwrap_err();
    assert!(matches!(err, ThoughtlineError::InvalidCanvas { .. }));
    let err = generate_trace("hola", 1000, -3).unwrap_err();
    assert!(matches!(err, ThoughtlineError::InvalidCanvas { .. }));
}

#[test]
fn batch_matches_sequential_generation() {
    let texts = ["uno.", "¿dos?", "¡tres!", ""];
    let cfg = small_config();
    let batch = generate_batch(&texts, &cfg);
    assert_eq!(batch.len(), texts.len());
    for (text, got) in texts.iter().zip(batch) {
        let got = got.unwrap();
        let want = generate_trace_with(text, &cfg).unwrap();
        assert_eq!(got.interpretation, want.interpretation);
        assert_eq!(got.image.data, want.image.data);
    }
}

#[test]
fn context_generates_from_the_last_saved_text() {
    let cfg = small_config();
    let mut ctx = InterpretationContext::new();
    let err = ctx.generate(&cfg).unwrap_err();
    assert!(err.to_string().contains("no interpretation saved yet"));

    ctx.remember("primero");
    ctx.remember("Un río de calma. Sin prisa.");
    assert_eq!(ctx.last(), Some("Un río de calma. Sin prisa."));
    let out = ctx.generate(&cfg).unwrap();
    let direct = generate_trace_with("Un río de calma. Sin prisa.", &cfg).unwrap();
    assert_eq!(out.interpretation.trace, direct.interpretation.trace);

    ctx.clear();
    assert_eq!(ctx.last(), None);
}

#[test]
fn configured_colors_reach_the_image() {
    let cfg = TraceConfig {
        background: Rgb8::new(0, 0, 40),
        ..small_config()
    };
    let out = generate_trace_with("hola", &cfg).unwrap();
    assert_eq!(out.image.pixel(0, 0), Some([0, 0, 40]));
}

#[test]
fn captions_are_opt_in() {
    assert!(TraceConfig::default().caption.is_empty());
    let text = "Hoy el río suena tranquilo.";
    let plain = generate_trace_with(text, &small_config()).unwrap();

    let mut cfg = small_config();
    cfg.caption.title = Some("Thought trace".to_string());
    cfg.font = Some(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/DejaVuSans.ttf"),
    );
    let titled = generate_trace_with(text, &cfg).unwrap();

    assert_eq!(titled.interpretation, plain.interpretation);
    assert_eq!(titled.image.content, plain.image.content);
    assert!(titled.image.painted_pixels(Rgb8::PAPER) > plain.image.painted_pixels(Rgb8::PAPER));
    // Only the title band changes.
    let row_bytes = 240 * 3;
    assert_eq!(
        titled.image.data[60 * row_bytes..],
        plain.image.data[60 * row_bytes..]
    );
}
