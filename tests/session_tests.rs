use wheelchair_nav::common::{AggregateRoot, DomainEvent};
use wheelchair_nav::config::{Config, GridConfig};
use wheelchair_nav::domains::navigation::*;
use wheelchair_nav::domains::wheelchair::*;

fn open_session() -> SimulationSession {
    SimulationSession::new(
        "session-test".to_string(),
        ObstacleField::empty(),
        Point::new(50, 50),
        GridConfig::default(),
    )
    .unwrap()
}

#[cfg(test)]
mod session_tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = open_session();

        assert_eq!(session.id, "session-test");
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.current_position(), Point::new(50, 50));
        assert!(session.current_path().is_empty());
        assert!(session.destination().is_none());
        assert_eq!(session.version(), 1);

        assert_eq!(session.uncommitted_events().len(), 1);
        match &session.uncommitted_events()[0] {
            SessionEvent::SessionStarted { session_id, start, .. } => {
                assert_eq!(session_id, "session-test");
                assert_eq!(*start, Point::new(50, 50));
            }
            _ => panic!("Expected SessionStarted event"),
        }
    }

    #[test]
    fn test_start_outside_grid_is_rejected() {
        let result = SimulationSession::new(
            "bad".to_string(),
            ObstacleField::empty(),
            Point::new(100, 0),
            GridConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_destination_plans_and_moves() {
        let mut session = open_session();

        let status = session.set_destination(Point::new(60, 50)).unwrap();
        assert_eq!(status, RouteStatus::Planned { steps: 10 });
        assert_eq!(session.state(), SessionState::Moving);
        assert_eq!(session.destination(), Some(Point::new(60, 50)));
        assert_eq!(session.current_path().len(), 11);
        assert_eq!(session.current_path().start(), Some(Point::new(50, 50)));
    }

    #[test]
    fn test_path_of_n_cells_takes_n_ticks() {
        let mut session = open_session();
        session.set_destination(Point::new(60, 50)).unwrap();
        let path = session.current_path().clone();

        for i in 0..path.len() {
            let moved = session.tick().unwrap();
            assert_eq!(moved, path.get(i));
            assert_eq!(session.current_position(), path.cells()[i]);
        }

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.current_position(), Point::new(60, 50));
        assert!(session.destination().is_none());
        assert_eq!(session.steps_taken(), 11);

        // Exhausted: further ticks change nothing.
        assert_eq!(session.tick().unwrap(), None);
        assert_eq!(session.current_position(), Point::new(60, 50));
        assert_eq!(session.steps_taken(), 11);

        assert!(session
            .uncommitted_events()
            .iter()
            .any(|e| e.event_type() == "DestinationReached"));
    }

    #[test]
    fn test_tick_while_idle_is_noop() {
        let mut session = open_session();
        let version = session.version();

        assert_eq!(session.tick().unwrap(), None);
        assert_eq!(session.version(), version);
        assert_eq!(session.current_position(), Point::new(50, 50));
    }

    #[test]
    fn test_new_destination_mid_route_replans_from_current_cell() {
        let mut session = open_session();
        session.set_destination(Point::new(60, 50)).unwrap();
        for _ in 0..4 {
            session.tick().unwrap();
        }
        assert_eq!(session.current_position(), Point::new(53, 50));

        session.mark_events_as_committed();
        let status = session.set_destination(Point::new(53, 60)).unwrap();

        assert_eq!(status, RouteStatus::Planned { steps: 10 });
        assert_eq!(session.current_path().start(), Some(Point::new(53, 50)));
        assert_eq!(session.current_path().goal(), Some(Point::new(53, 60)));
        assert!(!session.current_path().cells().contains(&Point::new(60, 50)));
        assert_eq!(session.remaining_steps(), 11);

        match &session.uncommitted_events()[0] {
            SessionEvent::RouteCancelled { abandoned_at, remaining, .. } => {
                assert_eq!(*abandoned_at, Point::new(53, 50));
                assert_eq!(*remaining, 7);
            }
            other => panic!("Expected RouteCancelled, got {:?}", other),
        }

        // Old path is gone: the next tick replays the new path's first cell.
        assert_eq!(session.tick().unwrap(), Some(Point::new(53, 50)));
        assert_eq!(session.tick().unwrap(), Some(Point::new(53, 51)));
    }

    #[test]
    fn test_unreachable_destination_keeps_agent_still() {
        let field = ObstacleField::new(vec![Obstacle::new(300.0, 250.0, 30.0, 30.0)]);
        let mut session =
            SimulationSession::new("s".to_string(), field, Point::new(50, 50), GridConfig::default()).unwrap();

        let status = session.set_destination(Point::new(60, 50)).unwrap();

        assert_eq!(status, RouteStatus::Unreachable);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.is_unreachable());
        assert_eq!(session.destination(), Some(Point::new(60, 50)));
        assert!(session.current_path().is_empty());
        assert_eq!(session.tick().unwrap(), None);
        assert_eq!(session.current_position(), Point::new(50, 50));

        // A reachable request clears the flag.
        session.set_destination(Point::new(50, 40)).unwrap();
        assert!(!session.is_unreachable());
        assert!(session.is_moving());
    }

    #[test]
    fn test_unreachable_request_cancels_running_route() {
        let field = ObstacleField::new(vec![Obstacle::new(300.0, 250.0, 30.0, 30.0)]);
        let mut session =
            SimulationSession::new("s".to_string(), field, Point::new(50, 50), GridConfig::default()).unwrap();
        session.set_destination(Point::new(50, 60)).unwrap();
        session.tick().unwrap();
        session.tick().unwrap();

        let status = session.set_destination(Point::new(60, 50)).unwrap();

        assert_eq!(status, RouteStatus::Unreachable);
        assert_eq!(session.remaining_steps(), 0);
        assert_eq!(session.tick().unwrap(), None);
        assert_eq!(session.current_position(), Point::new(50, 51));
    }

    #[test]
    fn test_out_of_bounds_destination_is_clamped() {
        let mut session = open_session();

        let status = session.set_destination(Point::new(150, -5)).unwrap();

        assert_eq!(session.destination(), Some(Point::new(99, 0)));
        assert_eq!(status, RouteStatus::Planned { steps: 99 });
        match session.uncommitted_events().last() {
            Some(SessionEvent::RoutePlanned { destination, .. }) => {
                assert_eq!(*destination, Point::new(99, 0))
            }
            other => panic!("Expected RoutePlanned, got {:?}", other),
        }
    }

    #[test]
    fn test_world_destination_is_scaled() {
        let mut session = open_session();
        session.set_destination_world(WorldPoint::new(302.0, 251.9)).unwrap();
        assert_eq!(session.destination(), Some(Point::new(60, 50)));
    }

    #[test]
    fn test_destination_equal_to_position() {
        let mut session = open_session();
        let status = session.set_destination(Point::new(50, 50)).unwrap();

        assert_eq!(status, RouteStatus::Planned { steps: 0 });
        assert_eq!(session.tick().unwrap(), Some(Point::new(50, 50)));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_replay_from_history_restores_state() {
        let mut session = open_session();
        session.set_destination(Point::new(58, 47)).unwrap();
        for _ in 0..5 {
            session.tick().unwrap();
        }
        session.set_destination(Point::new(40, 40)).unwrap();
        session.tick().unwrap();

        let replayed = SimulationSession::from_history(session.uncommitted_events()).unwrap();

        assert_eq!(replayed.id, session.id);
        assert_eq!(replayed.version(), session.version());
        assert_eq!(
            SceneProjection::from_session(&replayed),
            SceneProjection::from_session(&session)
        );
        assert!(replayed.uncommitted_events().is_empty());
    }

    #[test]
    fn test_history_must_start_with_session_started() {
        let mut session = open_session();
        session.set_destination(Point::new(55, 50)).unwrap();
        let events = session.uncommitted_events()[1..].to_vec();

        assert!(SimulationSession::from_history(&events).is_err());
        assert!(SimulationSession::from_history(&[]).is_err());
    }

    #[test]
    fn test_from_config_uses_seed() {
        let config = Config::default();
        let a = SimulationSession::from_config(&config, 99).unwrap();
        let b = SimulationSession::from_config(&config, 99).unwrap();

        assert_eq!(a.obstacles(), b.obstacles());
        assert_ne!(a.id, b.id);
        assert_eq!(a.current_position(), config.arena.start);
        assert_eq!(a.obstacles().len(), 5);
    }

    #[test]
    fn test_scene_projection_reflects_session() {
        let mut session = open_session();
        session.set_destination(Point::new(52, 50)).unwrap();
        session.tick().unwrap();
        session.tick().unwrap();

        let scene = SceneProjection::from_session(&session);
        assert_eq!(scene.position, Point::new(51, 50));
        assert_eq!(scene.render_position(), WorldPoint::new(255.0, 250.0));
        assert_eq!(scene.path.len(), 3);
        assert_eq!(scene.render_path()[2], WorldPoint::new(260.0, 250.0));
        assert_eq!(scene.state, SessionState::Moving);
        assert!(!scene.unreachable);
    }
}
