use wheelchair_nav::config::{ArenaConfig, GridConfig, ObstacleConfig};
use wheelchair_nav::domains::navigation::*;

#[test]
fn test_single_obstacle_blocks_three_by_three() {
    let field = ObstacleField::new(vec![Obstacle::new(52.0, 77.0, 30.0, 30.0)]);
    let grid = OccupancyGrid::build(&field, 100, 100, 5.0);

    // floor(52 / 5) = 10, floor(77 / 5) = 15
    for x in 9..=11 {
        for y in 14..=16 {
            assert!(grid.is_blocked(Point::new(x, y)), "({}, {}) should be blocked", x, y);
        }
    }
    assert_eq!(grid.blocked_count(), 9);
    assert!(!grid.is_blocked(Point::new(12, 15)));
    assert!(!grid.is_blocked(Point::new(10, 17)));
}

#[test]
fn test_obstacle_size_does_not_grow_footprint() {
    let small = ObstacleField::new(vec![Obstacle::new(100.0, 100.0, 30.0, 30.0)]);
    let large = ObstacleField::new(vec![Obstacle::new(100.0, 100.0, 49.9, 49.9)]);

    assert_eq!(
        OccupancyGrid::build(&small, 100, 100, 5.0),
        OccupancyGrid::build(&large, 100, 100, 5.0)
    );
}

#[test]
fn test_margin_is_clipped_at_grid_edges() {
    let field = ObstacleField::new(vec![Obstacle::new(0.0, 0.0, 30.0, 30.0)]);
    let grid = OccupancyGrid::build(&field, 100, 100, 5.0);

    assert_eq!(grid.blocked_count(), 4);
    assert!(grid.is_blocked(Point::new(0, 0)));
    assert!(grid.is_blocked(Point::new(1, 1)));
    assert!(!grid.is_blocked(Point::new(-1, -1)));
}

#[test]
fn test_overlapping_margins_merge() {
    let field = ObstacleField::new(vec![
        Obstacle::new(50.0, 50.0, 30.0, 30.0),
        Obstacle::new(55.0, 50.0, 30.0, 30.0),
    ]);
    let grid = OccupancyGrid::build(&field, 100, 100, 5.0);

    // Anchors (10, 10) and (11, 10): columns 9..=12, rows 9..=11.
    assert_eq!(grid.blocked_count(), 12);
}

#[test]
fn test_build_is_pure_and_repeatable() {
    let field = ObstacleField::new(vec![
        Obstacle::new(12.0, 240.0, 40.0, 35.0),
        Obstacle::new(330.0, 18.0, 31.0, 44.0),
    ]);
    let config = GridConfig::default();

    let a = OccupancyGrid::from_config(&field, &config);
    let b = OccupancyGrid::from_config(&field, &config);
    assert_eq!(a, b);
    assert_eq!(a.width(), 100);
    assert_eq!(a.height(), 100);
    assert_eq!(a.cell_count(), 10_000);
}

#[test]
fn test_empty_field_blocks_nothing() {
    let grid = OccupancyGrid::build(&ObstacleField::empty(), 100, 100, 5.0);
    assert_eq!(grid.blocked_count(), 0);
    assert!(grid.is_traversable(Point::new(0, 0)));
    assert!(!grid.is_traversable(Point::new(100, 0)));
}

#[test]
fn test_seeded_field_is_reproducible_and_in_range() {
    let arena = ArenaConfig::default();
    let config = ObstacleConfig::default();

    let a = ObstacleField::seeded(7, &arena, &config).unwrap();
    let b = ObstacleField::seeded(7, &arena, &config).unwrap();
    let c = ObstacleField::seeded(8, &arena, &config).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 5);
    for obstacle in a.iter() {
        assert!(obstacle.x >= 0.0 && obstacle.x < 450.0);
        assert!(obstacle.y >= 0.0 && obstacle.y < 250.0);
        assert!(obstacle.width >= 30.0 && obstacle.width < 50.0);
        assert!(obstacle.height >= 30.0 && obstacle.height < 50.0);
    }
}

#[test]
fn test_generate_rejects_empty_size_range() {
    let arena = ArenaConfig::default();
    let config = ObstacleConfig {
        min_size: 40.0,
        max_size: 40.0,
        ..ObstacleConfig::default()
    };

    assert!(ObstacleField::seeded(1, &arena, &config).is_err());
}

#[test]
fn test_world_to_grid_conversion_floors() {
    assert_eq!(Point::from_world(WorldPoint::new(302.0, 251.9), 5.0), Point::new(60, 50));
    assert_eq!(Point::from_world(WorldPoint::new(4.99, 0.0), 5.0), Point::new(0, 0));
    assert_eq!(Point::new(3, 4).to_world(5.0), WorldPoint::new(15.0, 20.0));
}

#[test]
fn test_obstacle_contains() {
    let obstacle = Obstacle::new(10.0, 10.0, 30.0, 40.0);
    assert!(obstacle.contains(WorldPoint::new(25.0, 45.0)));
    assert!(!obstacle.contains(WorldPoint::new(45.0, 45.0)));
    assert_eq!(obstacle.origin(), WorldPoint::new(10.0, 10.0));
}

#[test]
fn test_grid_bounds_agree_with_point_within() {
    let grid = OccupancyGrid::empty(100, 60);
    for p in [Point::new(0, 0), Point::new(99, 59), Point::new(100, 0), Point::new(5, 60), Point::new(-1, 3)] {
        assert_eq!(grid.in_bounds(p), p.within(100, 60));
    }
    assert!(!Point::new(99, 59).within(99, 59));
}
