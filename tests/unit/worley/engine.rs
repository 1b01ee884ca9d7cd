use super::*;

fn engine(cfg: WorleyConfig) -> WorleyEngine {
    WorleyEngine::new(42, &cfg).unwrap()
}

fn small_cells() -> WorleyConfig {
    WorleyConfig {
        cell_size: 16,
        points_per_cell: 3,
        ..WorleyConfig::default()
    }
}

#[test]
fn blocks_cover_every_pixel_once() {
    let size = Size::new(37, 20);
    let mut hits = vec![0u32; size.pixel_count()];
    for b in CellBlocks::new(size, 16) {
        assert!(b.x1 - b.x0 <= 16 && b.y1 - b.y0 <= 16);
        for y in b.y0..b.y1 {
            for x in b.x0..b.x1 {
                hits[(y * size.width + x) as usize] += 1;
            }
        }
    }
    assert!(hits.iter().all(|&h| h == 1));
    assert_eq!(CellBlocks::new(Size::new(0, 5), 16).count(), 0);
    assert_eq!(CellBlocks::new(Size::new(5, 0), 16).count(), 0);
}

#[test]
fn slice_matches_per_pixel_evaluation() {
    let e = engine(small_cells());
    let size = Size::new(40, 33);
    let field = e.render_slice(size, 5);
    for y in 0..size.height {
        for x in 0..size.width {
            assert_eq!(
                field.get(x, y),
                e.value_at_3d(i64::from(x), i64::from(y), 5),
                "pixel ({x}, {y})"
            );
        }
    }
}

#[test]
fn surface_matches_per_pixel_evaluation() {
    let e = engine(WorleyConfig {
        space: WorleySpace::Plane,
        ..small_cells()
    });
    let size = Size::new(35, 18);
    let field = e.render_field(size, 99);
    for y in 0..size.height {
        for x in 0..size.width {
            assert_eq!(field.get(x, y), e.value_at_2d(i64::from(x), i64::from(y)));
        }
    }
}

#[test]
fn plane_space_ignores_depth() {
    let e = engine(WorleyConfig {
        space: WorleySpace::Plane,
        ..small_cells()
    });
    let size = Size::new(24, 24);
    assert_eq!(e.render_field(size, 0), e.render_field(size, 300));
}

#[test]
fn volume_space_changes_with_depth() {
    let e = engine(small_cells());
    let size = Size::new(32, 32);
    assert_ne!(e.render_field(size, 0), e.render_field(size, 8));
}

#[test]
fn values_stay_in_unit_range_for_every_metric() {
    let size = Size::new(48, 48);
    for metric in DistanceMetric::ALL {
        for value_fn in [ValueFunction::SecondMinusFirst, ValueFunction::Closest] {
            let e = engine(WorleyConfig {
                metric,
                value_fn,
                ..small_cells()
            });
            let field = e.render_field(size, 3);
            assert_eq!(field.values.len(), size.pixel_count());
            assert!(
                field.values.iter().all(|v| (0.0..=1.0).contains(v)),
                "{metric:?} {value_fn:?}"
            );
        }
    }
}

#[test]
fn metric_selection_changes_the_field() {
    let e = engine(small_cells());
    let size = Size::new(64, 64);
    let euclid = e.with_metric(DistanceMetric::Euclidean).render_field(size, 0);
    let cheb = e.with_metric(DistanceMetric::Chebyshev).render_field(size, 0);
    assert_ne!(euclid, cheb);
}

#[test]
fn same_seed_renders_identically() {
    let size = Size::new(64, 64);
    let a = WorleyEngine::new(42, &WorleyConfig::default()).unwrap();
    let b = WorleyEngine::new(42, &WorleyConfig::default()).unwrap();
    assert_eq!(a.render_field(size, 0), b.render_field(size, 0));

    let c = WorleyEngine::new(7, &WorleyConfig::default()).unwrap();
    assert_ne!(a.render_field(size, 0), c.render_field(size, 0));
}

#[test]
fn fast_sqrt_error_is_bounded() {
    let size = Size::new(64, 64);
    let exact = engine(small_cells()).render_field(size, 2);
    let fast = engine(WorleyConfig {
        fast_sqrt: true,
        ..small_cells()
    })
    .render_field(size, 2);

    // Each distance is within ~6.1% of exact; with cell_size 16 that bounds
    // |F2 - F1| error by 0.061 * (F1 + F2) / 16.
    let max_err = exact
        .values
        .iter()
        .zip(&fast.values)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);
    assert!(max_err > 0.0);
    assert!(max_err < 0.5, "max_err={max_err}");
}

#[test]
fn invalid_config_is_rejected() {
    assert!(
        WorleyConfig {
            cell_size: 0,
            ..WorleyConfig::default()
        }
        .validate()
        .is_err()
    );
    assert!(
        WorleyEngine::new(
            1,
            &WorleyConfig {
                points_per_cell: 0,
                ..WorleyConfig::default()
            }
        )
        .is_err()
    );
    assert!(WorleyConfig::default().validate().is_ok());
}

#[test]
fn space_parses_case_insensitively() {
    assert_eq!("Volume".parse::<WorleySpace>().unwrap(), WorleySpace::Volume);
    assert_eq!("PLANE".parse::<WorleySpace>().unwrap(), WorleySpace::Plane);
    assert_eq!("2d".parse::<WorleySpace>().unwrap(), WorleySpace::Plane);
    assert!("sphere".parse::<WorleySpace>().is_err());
}

#[test]
fn closest_values_do_not_depend_on_frame_extent() {
    let e = engine(WorleyConfig {
        value_fn: ValueFunction::Closest,
        ..small_cells()
    });
    let small = e.render_field(Size::new(16, 16), 5);
    let large = e.render_field(Size::new(48, 40), 5);
    for y in 0..16 {
        for x in 0..16 {
            assert_eq!(small.get(x, y), large.get(x, y), "({x}, {y})");
        }
    }
    let other = e.render_field(Size::new(16, 16), 6);
    assert_eq!(e.value_at_3d(3, 4, 6), other.get(3, 4));
}
