//! End-to-end checks of the render pass.
//!
//! Run with: RUST_LOG=debug cargo test --features tracing -- --nocapture

use std::sync::{Arc, Once};

use glam::dvec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tilemix::{
    Bounds, Color, Composer, DataBuffer, DerivedBuffer, Image, Mask, Rect, Reduction,
    RenderConfig, Tile, Tiling, WeavingSpec, legend, render,
};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

const RED: Color = Color::rgb(1.0, 0.0, 0.0);
const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

/// Deterministic pseudo-random field, values in [0, 1)
fn field(name: &str, width: usize, height: usize, seed: u64) -> DataBuffer {
    let values = (0..width * height)
        .map(|i| {
            let x = (i as u64 + 1)
                .wrapping_mul(6364136223846793005)
                .wrapping_add(seed.wrapping_mul(1442695040888963407));
            (x >> 40) as f64 / (1u64 << 24) as f64
        })
        .collect();
    DataBuffer::from_values(name, width, height, values).unwrap()
}

#[test]
fn pixel_tiling_constant_fill_round_trip() {
    init_tracing();
    let (w, h) = (7, 5);
    let tiling = Tiling::pixel(w, h).unwrap();
    let mut image = Image::new(w, h);
    for tile in &tiling {
        image.fill_by_tile(GREEN, &tile, None);
    }
    assert_eq!(image.pixels().len(), w * h);
    assert!(image.pixels().iter().all(|&p| p == GREEN));
}

#[test]
fn rectangular_tiles_fill_without_overlap() {
    let (w, h) = (11, 6);
    let tiling = Tiling::rectangular(w, h, 4, 4).unwrap();
    let mut image = Image::new(w, h);
    // each tile adds one unit of red; overlap would show up as r > 1
    for tile in &tiling {
        let rows = (tile.y as usize)..(tile.y as usize + tile.height()).min(h);
        let cols = (tile.x as usize)..(tile.x as usize + tile.width()).min(w);
        for r in rows {
            for c in cols.clone() {
                let current = image.get(c, r).unwrap();
                let bumped = current + Color::new(1.0, 0.0, 0.0, 0.0);
                image.fill_by_rect(bumped, Rect::from_origin(c as i64, r as i64, 1, 1));
            }
        }
    }
    assert!(image.pixels().iter().all(|p| p.r == 1.0));
}

#[test]
fn aggregation_matches_direct_sum() {
    let buffer = field("f", 9, 7, 3);
    let tiling = Tiling::rectangular(9, 7, 4, 3).unwrap();
    for tile in &tiling {
        let (x0, y0) = (tile.x as usize, tile.y as usize);
        let mut sum = 0.0;
        let mut count = 0;
        for r in y0..(y0 + tile.height()).min(buffer.height()) {
            for c in x0..(x0 + tile.width()).min(buffer.width()) {
                sum += buffer.get(c, r).unwrap();
                count += 1;
            }
        }
        let got_sum = tile.aggregate(&buffer, Reduction::Sum);
        let got_mean = tile.aggregate(&buffer, Reduction::Mean);
        assert!((got_sum - sum).abs() < 1e-12);
        assert!((got_mean - sum / count as f64).abs() < 1e-12);
    }
}

#[test]
fn empty_footprint_aggregates_to_zero() {
    let buffer = field("f", 4, 4, 1);
    let tile = Tile::new(100.0, -50.0, Arc::new(Mask::full(3, 3).unwrap()));
    assert_eq!(tile.aggregate(&buffer, Reduction::Sum), 0.0);
    assert_eq!(tile.aggregate(&buffer, Reduction::Mean), 0.0);
}

#[test]
fn max_composite_tie_goes_to_first_class() {
    let a = DataBuffer::from_values("a", 1, 1, vec![5.0]).unwrap().with_color(RED);
    let b = DataBuffer::from_values("b", 1, 1, vec![5.0]).unwrap().with_color(GREEN);
    let c = DataBuffer::from_values("c", 1, 1, vec![3.0]).unwrap().with_color(BLUE);
    let classes: Vec<_> = [&a, &b, &c]
        .into_iter()
        .map(|buf| {
            let color = buf.color.unwrap();
            DerivedBuffer::new(buf, move |_: f64| color)
        })
        .collect();
    let out = render(&RenderConfig::new(1, 1), &classes).unwrap();
    assert_eq!(out.image.get(0, 0), Some(RED));
}

#[test]
fn mix_composite_is_order_independent() {
    let a = DataBuffer::from_values("a", 2, 1, vec![0.5, 0.25]).unwrap().with_color(RED);
    let b = DataBuffer::from_values("b", 2, 1, vec![0.5, 0.75]).unwrap().with_color(BLUE);
    let config = RenderConfig::new(2, 1).with_composer(Composer::Mix);

    let forward = render(&config, &[DerivedBuffer::whitened(&a), DerivedBuffer::whitened(&b)]).unwrap();
    let reverse = render(&config, &[DerivedBuffer::whitened(&b), DerivedBuffer::whitened(&a)]).unwrap();
    assert_eq!(forward.image, reverse.image);
}

#[test]
fn weaving_masks_partition_the_image() {
    let (w, h, size, m) = (23, 17, 4, 3);
    let mut rng = StdRng::seed_from_u64(99);
    let masks = WeavingSpec::random(size).partition_with_rng(w, h, m, &mut rng).unwrap();

    for r in 0..h {
        for c in 0..w {
            let owners = masks.iter().filter(|mask| mask.is_set(c, r)).count();
            assert_eq!(owners, 1, "pixel ({c}, {r})");
        }
    }
    let total: usize = masks.iter().map(Mask::count_set).sum();
    assert_eq!(total, w * h);
}

#[test]
fn weaving_render_classes_do_not_compete() {
    init_tracing();
    let mut buffers = vec![
        field("a", 12, 8, 1).with_color(RED),
        field("b", 12, 8, 2).with_color(GREEN),
    ];
    DataBuffer::normalize_all(&mut buffers);

    let masks = WeavingSpec::square(2).partition(12, 8, 2).unwrap();
    tilemix::assign_masks(&mut buffers, &masks).unwrap();

    let classes: Vec<_> = buffers.iter().map(DerivedBuffer::whitened).collect();
    let config = RenderConfig::new(12, 8)
        .with_composer(Composer::Weaving)
        .with_rect_tiles(3, 3)
        .with_reduction(Reduction::Mean);
    let out = render(&config, &classes).unwrap();

    for tile in &out.tiles {
        let rows = (tile.y as usize)..(tile.y as usize + 3).min(8);
        let cols = (tile.x as usize)..(tile.x as usize + 3).min(12);
        for r in rows {
            for c in cols.clone() {
                let owner = if masks[0].is_set(c, r) { 0 } else { 1 };
                let expected = classes[owner].color_for(tile.data_values[owner]);
                assert_eq!(out.image.get(c, r), Some(expected));
            }
        }
    }
}

#[test]
fn fills_past_the_edge_only_touch_in_bounds_pixels() {
    let mut image = Image::new(3, 3);
    image.fill_by_rect(RED, Rect::from_origin(1, 1, 100, 100));
    image.fill_by_tile(BLUE, &Tile::rect(2, 0, 50, 1).unwrap(), None);

    let expected = [
        [Color::TRANSPARENT, Color::TRANSPARENT, BLUE],
        [Color::TRANSPARENT, RED, RED],
        [Color::TRANSPARENT, RED, RED],
    ];
    for (r, row) in expected.iter().enumerate() {
        for (c, &color) in row.iter().enumerate() {
            assert_eq!(image.get(c, r), Some(color));
        }
    }
}

#[test]
fn binned_points_render_and_summarize() {
    init_tracing();
    let bounds = Bounds::try_new(dvec2(0.0, 0.0), dvec2(1.0, 1.0)).unwrap();
    let left = (0..40).map(|i| dvec2(0.1 + (i % 4) as f64 * 0.05, (i / 4) as f64 * 0.1));
    let right = (0..20).map(|i| dvec2(0.9, (i % 10) as f64 * 0.1));

    let mut buffers = vec![
        DataBuffer::from_points("left", 4, 4, bounds, left).unwrap().with_color(RED),
        DataBuffer::from_points("right", 4, 4, bounds, right).unwrap().with_color(BLUE),
    ];
    DataBuffer::normalize_all(&mut buffers);
    let classes: Vec<_> = buffers.iter().map(DerivedBuffer::whitened).collect();

    let config = RenderConfig::new(4, 4).with_rect_tiles(2, 4).with_reduction(Reduction::Sum);
    let out = render(&config, &classes).unwrap();

    let totals = legend::class_totals(&out.tiles, classes.len());
    let direct: Vec<f64> = buffers.iter().map(|b| b.values().iter().sum()).collect();
    for (t, d) in totals.iter().zip(&direct) {
        assert!((t - d).abs() < 1e-12);
    }
    // left mass wins the left half, right mass the right half
    assert_eq!(out.tiles[0].data_values[1], 0.0);
    assert_eq!(out.tiles[1].data_values[0], 0.0);

    let entries = legend::entries(&classes);
    assert_eq!(entries[0].name, "left");
    assert_eq!(entries[1].color, BLUE);
}
