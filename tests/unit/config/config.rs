use super::*;

use crate::foundation::core::FrameIndex;
use crate::worley::metric::DistanceMetric;

#[test]
fn defaults_describe_a_single_white_frame() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.size, Size::new(1024, 1024));
    assert_eq!(cfg.kind, NoiseKind::White);
    assert_eq!(cfg.color, ColorMultiplier::WHITE);
    assert_eq!(cfg.frames, 1);
    assert_eq!(cfg.offset, 0);
    assert_eq!(cfg.threads, None);
    assert_eq!(cfg.seed, None);
    assert_eq!(cfg.output.pattern(), "noise.png");
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_in_defaults() {
    let cfg: RenderConfig = serde_json::from_str(
        r##"{
            "size": { "width": 64, "height": 32 },
            "kind": "worley",
            "color": "#ff8000",
            "frames": 4,
            "offset": 10,
            "seed": 42,
            "output": "out/frame_##.png",
            "worley": { "metric": "chebyshev", "cell_size": 16 }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.size, Size::new(64, 32));
    assert_eq!(cfg.kind, NoiseKind::Worley);
    assert_eq!(cfg.color.rgb, [255, 128, 0]);
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.worley.metric, DistanceMetric::Chebyshev);
    assert_eq!(cfg.worley.cell_size, 16);
    assert_eq!(cfg.worley.points_per_cell, 3);
    assert_eq!(
        cfg.frame_range().unwrap(),
        FrameRange::new(FrameIndex(10), FrameIndex(14)).unwrap()
    );
    cfg.validate().unwrap();
}

#[test]
fn unknown_fields_and_bad_colours_are_rejected() {
    assert!(serde_json::from_str::<RenderConfig>(r#"{ "colour_depth": 8 }"#).is_err());
    assert!(serde_json::from_str::<RenderConfig>(r##"{ "color": "#12345" }"##).is_err());
    assert!(serde_json::from_str::<RenderConfig>(r#"{ "kind": "plaid" }"#).is_err());
}

#[test]
fn validate_rejects_degenerate_settings() {
    let base = RenderConfig::default();

    let mut cfg = base.clone();
    cfg.size = Size::new(0, 10);
    assert!(matches!(cfg.validate(), Err(NoiseError::Validation(_))));

    let mut cfg = base.clone();
    cfg.frames = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = base.clone();
    cfg.offset = u64::MAX;
    assert!(cfg.validate().is_err());

    let mut cfg = base.clone();
    cfg.offset = i64::MAX as u64;
    assert!(cfg.validate().is_err());

    let mut cfg = base.clone();
    cfg.worley.cell_size = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = base;
    cfg.worley.points_per_cell = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn zero_threads_is_clamped_not_rejected() {
    let cfg = RenderConfig {
        threads: Some(0),
        ..RenderConfig::default()
    };
    cfg.validate().unwrap();
}

#[test]
fn worley_depth_stays_inside_the_grid_range() {
    let worley_at = |offset: u64| RenderConfig {
        kind: NoiseKind::Worley,
        size: Size::new(4, 4),
        offset,
        ..RenderConfig::default()
    };

    let err = worley_at(i64::MAX as u64 - 1).validate().unwrap_err();
    assert!(matches!(err, NoiseError::Validation(_)));

    let max = SpatialGrid::max_coordinate(SpatialGrid::DEFAULT_CELL_SIZE) as u64;
    worley_at(max).validate().unwrap();
    assert!(worley_at(max + 1).validate().is_err());

    let mut two = worley_at(max);
    two.frames = 2;
    assert!(two.validate().is_err());

    // Plane space ignores depth and other kinds never build the 3D grid.
    let mut plane = worley_at(i64::MAX as u64 - 1);
    plane.worley.space = WorleySpace::Plane;
    plane.validate().unwrap();
    let mut white = worley_at(i64::MAX as u64 - 1);
    white.kind = NoiseKind::White;
    white.validate().unwrap();
}

#[test]
fn loads_from_file() {
    let dir = std::path::PathBuf::from("target")
        .join("unit_output")
        .join("config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("render.json");
    std::fs::write(&path, r#"{ "kind": "perlin", "frames": 3 }"#).unwrap();

    let cfg = RenderConfig::from_path(&path).unwrap();
    assert_eq!(cfg.kind, NoiseKind::Perlin);
    assert_eq!(cfg.frames, 3);

    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        RenderConfig::from_path(&path),
        Err(NoiseError::Serde(_))
    ));
    assert!(matches!(
        RenderConfig::from_path(&dir.join("missing.json")),
        Err(NoiseError::Other(_))
    ));
}
