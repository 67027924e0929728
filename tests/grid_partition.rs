use eframe_puzzle::{PuzzleConfig, PuzzleEngine, PuzzleError, TileId};
use egui::{Pos2, Vec2};

fn create_config(rows: usize, cols: usize, margin: f32) -> PuzzleConfig {
    PuzzleConfig {
        rows,
        cols,
        margin,
        ..Default::default()
    }
}

#[test]
fn test_grid_tile_count_and_size() {
    let engine = PuzzleEngine::new([130, 95], create_config(3, 4, 25.0)).unwrap();

    assert_eq!(engine.tiles().len(), 12);
    assert_eq!(engine.tile_size(), Vec2::new(32.0, 31.0));
    for tile in engine.tiles() {
        assert_eq!(tile.size(), Vec2::new(32.0, 31.0));
    }
}

#[test]
fn test_grid_homes_cover_region_row_by_row() {
    let (rows, cols, margin) = (3, 4, 25.0);
    let engine = PuzzleEngine::new([130, 95], create_config(rows, cols, margin)).unwrap();
    let size = engine.tile_size();

    // Tiles are laid out left to right, top to bottom, without gaps
    for (index, tile) in engine.tiles().iter().enumerate() {
        let (row, col) = (index / cols, index % cols);
        assert_eq!(tile.id(), TileId(index));
        assert_eq!(
            tile.home(),
            Pos2::new(margin + col as f32 * size.x, margin + row as f32 * size.y)
        );
        assert_eq!(tile.source_rect().min, tile.home() - Vec2::splat(margin));
    }

    // ...and without overlaps
    let tiles = engine.tiles();
    for (i, a) in tiles.iter().enumerate() {
        for b in &tiles[i + 1..] {
            let overlap = a.home_rect().intersect(b.home_rect());
            assert!(overlap.width() <= 0.0 || overlap.height() <= 0.0);
        }
    }

    let last = tiles.last().unwrap();
    assert_eq!(
        last.home_rect().max,
        Pos2::new(margin + cols as f32 * size.x, margin + rows as f32 * size.y)
    );
}

#[test]
fn test_surface_adds_margin_on_each_side() {
    let engine = PuzzleEngine::new([200, 150], create_config(5, 5, 100.0)).unwrap();
    assert_eq!(engine.image_size(), Vec2::new(200.0, 150.0));
    assert_eq!(engine.surface_size(), Vec2::new(400.0, 350.0));
}

#[test]
fn test_initial_puzzle_is_complete() {
    let engine = PuzzleEngine::new([200, 200], create_config(2, 2, 0.0)).unwrap();

    assert_eq!(engine.tiles().len(), 4);
    assert!(engine.tiles().iter().all(|tile| tile.is_in_place()));
    assert!(engine.is_complete());
    assert!(!engine.state().shuffled);
}

#[test]
fn test_any_tile_out_of_place_breaks_completion() {
    let mut engine = PuzzleEngine::new([300, 200], create_config(2, 3, 10.0)).unwrap();

    for index in 0..6 {
        let id = TileId(index);
        let home = engine.tile(id).unwrap().home();

        engine.set_tile_position(id, home + Vec2::new(1.0, 0.0));
        assert!(!engine.tile(id).unwrap().is_in_place());
        assert!(!engine.is_complete());

        engine.set_tile_position(id, home);
        assert!(engine.tile(id).unwrap().is_in_place());
        assert!(engine.is_complete());
    }
}

#[test]
fn test_zero_rows_is_rejected() {
    let result = PuzzleEngine::new([200, 200], create_config(0, 3, 0.0));
    assert!(matches!(result, Err(PuzzleError::InvalidGrid { rows: 0, cols: 3 })));
}

#[test]
fn test_image_smaller_than_grid_is_rejected() {
    let result = PuzzleEngine::new([3, 200], create_config(2, 4, 0.0));
    assert!(matches!(result, Err(PuzzleError::ImageTooSmall { width: 3, .. })));
}

#[test]
fn test_shuffle_stays_on_surface() {
    for seed in 0..20 {
        let mut engine = PuzzleEngine::new([230, 170], create_config(3, 3, 40.0))
            .unwrap()
            .with_seed(seed);
        engine.shuffle();

        let surface = engine.surface_size();
        for tile in engine.tiles() {
            let max = surface - tile.size();
            let pos = tile.position();
            assert!(
                pos.x >= 0.0 && pos.x <= max.x,
                "seed {seed}: x {} out of [0, {}]",
                pos.x,
                max.x
            );
            assert!(
                pos.y >= 0.0 && pos.y <= max.y,
                "seed {seed}: y {} out of [0, {}]",
                pos.y,
                max.y
            );
        }
    }
}

#[test]
fn test_shuffle_scatters_tiles() {
    let mut engine = PuzzleEngine::new([200, 200], create_config(2, 2, 0.0))
        .unwrap()
        .with_seed(7);
    engine.shuffle();

    assert!(engine.state().shuffled);
    assert!(engine.state().dirty);
    assert!(engine.tiles().iter().any(|tile| !tile.is_in_place()));
    assert!(!engine.is_complete());
}

#[test]
fn test_same_seed_same_shuffle() {
    let positions = |seed| {
        let mut engine = PuzzleEngine::new([200, 200], create_config(2, 2, 20.0))
            .unwrap()
            .with_seed(seed);
        engine.shuffle();
        engine.tiles().iter().map(|tile| tile.position()).collect::<Vec<_>>()
    };
    assert_eq!(positions(42), positions(42));
}
