use std::f32::consts::TAU;
use std::thread;

use approx::assert_relative_eq;
use glam::{IVec2, IVec3, UVec2, UVec3, Vec2, Vec3};
use tracing_subscriber::EnvFilter;

use grid_dda::types::{FREE, OCCUPIED};
use grid_dda::{
    AnyPosition, Blocker, Grid2d, Grid3d, MapInfo, OccupancyThreshold, RayCastInfo, TraversalError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn open(cell: &bool) -> bool {
    *cell
}

/// 16x16 occupancy grid at 0.25 with a sprinkling of occupied cells.
fn cluttered_grid() -> Grid2d<i8> {
    let info = MapInfo::square(16, 0.25).with_origin(Vec3::new(-2.0, -2.0, 0.0));
    let mut grid = Grid2d::filled(info, FREE).expect("grid should build");
    for (x, y) in [(3, 12), (12, 12), (13, 4), (1, 1), (8, 15), (15, 9)] {
        grid.set(&UVec2::new(x, y), OCCUPIED).expect("in bounds");
    }
    grid
}

fn directions_2d() -> impl Iterator<Item = Vec2> {
    (0..72).map(|i| Vec2::from_angle(i as f32 * TAU / 72.0 + 0.013))
        .chain([Vec2::X, Vec2::Y, Vec2::NEG_X, Vec2::NEG_Y, Vec2::ONE, Vec2::NEG_ONE])
}

fn directions_3d() -> Vec<Vec3> {
    let mut dirs = vec![
        Vec3::X,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::ONE,
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, 0.0),
    ];
    for i in 0..12 {
        let theta = i as f32 * TAU / 12.0 + 0.05;
        for phi in [-1.2f32, -0.4, 0.3, 1.1] {
            dirs.push(Vec3::new(theta.cos() * phi.cos(), theta.sin() * phi.cos(), phi.sin()));
        }
    }
    dirs
}

#[test]
fn cast_stays_within_budget() {
    init_tracing();
    let grid = cluttered_grid();
    let start = Vec2::new(0.1, -0.3);

    for max in [0.3, 1.0, 2.5, 10.0] {
        for dir in directions_2d() {
            let hit = grid.cast_ray(start, dir, max, OccupancyThreshold::default());
            assert!(hit.distance <= max, "{dir}: {} > {max}", hit.distance);
            assert!(hit.distance >= 0.0);
            if !hit.hit {
                assert_eq!(hit.distance, max);
                assert_eq!(hit.blocker, None);
            }
        }
    }
}

#[test]
fn march_segments_sum_to_total() {
    init_tracing();
    let grid = cluttered_grid();
    let start = Vec2::new(0.1, -0.3);

    for dir in directions_2d() {
        let marched = grid.march_ray(start, dir, 10.0, OccupancyThreshold::default());
        assert!(!marched.is_empty(), "{dir}");

        let sum: f32 = marched.segments.iter().map(|s| s.length).sum();
        assert_relative_eq!(sum, marched.total_length, epsilon = 1e-4);
        assert!(marched.segments.iter().all(|s| s.length > 0.0));
    }
}

#[test]
fn march_visits_neighbouring_cells_once_in_order() {
    let grid = cluttered_grid();
    let start = Vec2::new(0.1, -0.3);
    let resolution = grid.info().resolution;

    for dir in directions_2d() {
        let marched = grid.march_ray(start, dir, 10.0, OccupancyThreshold::default());
        let cells: Vec<IVec2> = marched.cells().copied().collect();

        for pair in cells.windows(2) {
            let delta = pair[1] - pair[0];
            assert!(delta.abs().max_element() == 1, "{dir}: jump {delta}");
            // Travel order: every step moves along the ray, never against it.
            assert!(delta.as_vec2().dot(dir) > 0.0, "{dir}: step {delta} against travel");
        }
        for (i, cell) in cells.iter().enumerate() {
            assert!(!cells[i + 1..].contains(cell), "{dir}: {cell} visited twice");
        }

        // A straight ray crosses at most one line per axis per cell width.
        let bound = (10.0 / resolution).ceil() as usize * 2 + 2;
        assert!(cells.len() <= bound);
    }
}

#[test]
fn cast_and_march_agree() {
    let grid = cluttered_grid();
    let start = Vec2::new(0.1, -0.3);

    for dir in directions_2d() {
        let hit = grid.cast_ray(start, dir, 10.0, OccupancyThreshold::default());
        let marched = grid.march_ray(start, dir, 10.0, OccupancyThreshold::default());
        assert_eq!(hit.distance, marched.total_length, "{dir}");
    }
}

#[test]
fn axis_aligned_rays_keep_their_row() {
    let grid = cluttered_grid();
    let start = Vec2::new(-1.9, 0.6);
    let row = grid.cell_of(&start).y;

    for dir in [Vec2::X, Vec2::NEG_X] {
        let marched = grid.march_ray(start, dir, 10.0, OccupancyThreshold::default());
        assert!(marched.cells().all(|c| c.y == row));
        assert!(marched.total_length.is_finite());
    }
}

#[test]
fn zero_direction_ignores_grid_contents() {
    init_tracing();
    let blocked = Grid2d::filled(MapInfo::square(3, 1.0), false).unwrap();
    let free = Grid2d::filled(MapInfo::square(3, 1.0), true).unwrap();

    for grid in [&blocked, &free] {
        let hit = grid.cast_ray(Vec2::splat(1.5), Vec2::ZERO, 10.0, open);
        assert_eq!(hit, RayCastInfo::miss(0.0));
        assert!(grid.march_ray(Vec2::splat(1.5), Vec2::ZERO, 10.0, open).is_empty());
    }
}

#[test]
fn volume_properties() {
    init_tracing();
    let mut grid = Grid3d::filled(MapInfo::cube(8, 0.5), true).unwrap();
    for cell in [UVec3::new(6, 6, 6), UVec3::new(0, 7, 3), UVec3::new(5, 1, 0)] {
        grid.set(&cell, false).unwrap();
    }
    let start = Vec3::new(1.7, 2.1, 1.9);

    for dir in directions_3d() {
        let hit = grid.cast_ray(start, dir, 6.0, open);
        let marched = grid.march_ray(start, dir, 6.0, open);

        assert!(hit.distance <= 6.0);
        assert_eq!(hit.distance, marched.total_length, "{dir}");

        let sum: f32 = marched.segments.iter().map(|s| s.length).sum();
        assert_relative_eq!(sum, marched.total_length, epsilon = 1e-4);

        let cells: Vec<IVec3> = marched.cells().copied().collect();
        assert_eq!(cells[0], IVec3::new(3, 4, 3));
        for pair in cells.windows(2) {
            let delta = pair[1] - pair[0];
            assert_eq!(delta.abs().max_element(), 1, "{dir}: jump {delta}");
        }
    }
}

#[test]
fn refused_rays_report_reason() {
    let grid = cluttered_grid();

    let err = grid
        .try_cast_ray(Vec2::new(-1.6, -1.6), Vec2::X, 5.0, OccupancyThreshold::default(), AnyPosition)
        .expect_err("start cell is occupied");
    assert_eq!(err, TraversalError::InvalidOrigin(Blocker::Impassable));

    let err = grid
        .try_march_ray(Vec2::new(5.0, 0.0), Vec2::X, 5.0, OccupancyThreshold::default(), AnyPosition)
        .expect_err("start outside the map");
    assert_eq!(err, TraversalError::InvalidOrigin(Blocker::OutOfBounds));

    for (start, dir) in [
        (Vec2::new(3.0e9, 0.5), Vec2::X),
        (Vec2::new(3.0e9, 0.5), Vec2::NEG_X),
        (Vec2::new(-3.0e9, 0.5), Vec2::X),
        (Vec2::new(-3.0e9, 0.5), Vec2::NEG_X),
    ] {
        let err = grid
            .try_cast_ray(start, dir, 10.0, OccupancyThreshold::default(), AnyPosition)
            .expect_err("start far outside the map");
        assert_eq!(err, TraversalError::InvalidOrigin(Blocker::OutOfBounds), "{start} {dir}");
        assert!(grid.march_ray(start, dir, 10.0, OccupancyThreshold::default()).is_empty());
    }
}

#[test]
fn concurrent_traversals_share_a_grid() {
    let grid = cluttered_grid();
    let start = Vec2::new(0.1, -0.3);
    let dirs: Vec<Vec2> = directions_2d().collect();

    let sequential: Vec<_> = dirs
        .iter()
        .map(|dir| grid.march_ray(start, *dir, 10.0, OccupancyThreshold::default()))
        .collect();

    let parallel: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = dirs
            .chunks(16)
            .map(|chunk| {
                let grid = &grid;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|dir| grid.march_ray(start, *dir, 10.0, OccupancyThreshold::default()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("worker panicked"))
            .collect()
    });

    assert_eq!(sequential, parallel);
}
