#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::commands::AnchorCommand;
    use crate::components::{AnchorConfig, AnchorState};
    use crate::enums::{CollisionResponse, NetRole};
    use crate::events::{AnchorEvent, HitInfo};
    use crate::replication::{AnchorField, ReplicationBatch, ReplicationMessage};
    use crate::types::{NetId, Position, SimTime, Transform, Velocity};

    /// Verify all enums round-trip through serde_json.
    #[test]
    fn test_net_role_serde() {
        let variants = vec![NetRole::Authority, NetRole::SimulatedProxy];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: NetRole = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
        assert!(NetRole::Authority.is_authority());
        assert!(!NetRole::SimulatedProxy.is_authority());
    }

    #[test]
    fn test_collision_response_serde() {
        let variants = vec![CollisionResponse::Ignore, CollisionResponse::Block];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: CollisionResponse = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
        assert_eq!(CollisionResponse::default(), CollisionResponse::Ignore);
    }

    /// Verify AnchorCommand round-trips through serde (tagged union).
    #[test]
    fn test_anchor_command_serde() {
        let commands = vec![
            AnchorCommand::SetSpeed {
                anchor: NetId(3),
                speed: 1500.0,
            },
            AnchorCommand::StartPull {
                anchor: NetId(3),
                target: NetId(9),
            },
            AnchorCommand::StopPull {
                anchor: NetId(3),
                destroy_self: true,
            },
            AnchorCommand::ActivateCollision { anchor: NetId(3) },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: AnchorCommand = serde_json::from_str(&json).unwrap();
            // Compare JSON representations since AnchorCommand doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    /// Verify AnchorEvent round-trips through serde.
    #[test]
    fn test_anchor_event_serde() {
        let hit = HitInfo {
            position: Position::new(100.0, 0.0, 0.0),
            normal: DVec3::new(-1.0, 0.0, 0.0),
            blocker: Some(NetId(4)),
        };
        let events = vec![
            AnchorEvent::HookshotHit {
                anchor: NetId(1),
                hit,
            },
            AnchorEvent::PullBlocked {
                anchor: NetId(1),
                hit,
            },
            AnchorEvent::AnchorExpire {
                anchor: NetId(1),
                transform: Transform {
                    position: Position::new(0.0, 2000.0, 0.0),
                    heading: 0.0,
                },
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: AnchorEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event.anchor(), back.anchor());
        }
    }

    /// Verify replication messages round-trip through serde.
    #[test]
    fn test_replication_batch_serde() {
        let batch = ReplicationBatch {
            tick: 42,
            messages: vec![
                ReplicationMessage::AnchorSpawned {
                    anchor: NetId(7),
                    config: AnchorConfig::default(),
                    position: Position::new(0.0, 0.0, 100.0),
                    velocity: Velocity::new(0.0, 1000.0, 0.0),
                    is_live: false,
                    dynamic_speed: 1000.0,
                },
                ReplicationMessage::AnchorDelta {
                    anchor: NetId(7),
                    fields: vec![
                        AnchorField::IsLive { value: true },
                        AnchorField::DynamicSpeed { value: 1500.0 },
                        AnchorField::PullTarget {
                            value: Some(NetId(2)),
                        },
                        AnchorField::TrackedPosition {
                            value: Position::new(1.0, 2.0, 3.0),
                        },
                    ],
                },
                ReplicationMessage::AnchorDestroyed { anchor: NetId(7) },
            ],
        };
        let json = serde_json::to_string(&batch).unwrap();
        let back: ReplicationBatch = serde_json::from_str(&json).unwrap();
        assert_eq!(batch, back);
    }

    /// Verify Position geometry calculations.
    #[test]
    fn test_position_range() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert!((a.range_to(&b) - 5.0).abs() < 1e-10);
    }

    /// interp_to moves a constant fraction of the remaining delta.
    #[test]
    fn test_interp_to_fraction() {
        let current = Position::new(0.0, 0.0, 0.0);
        let target = Position::new(100.0, 0.0, 0.0);

        // dt * speed = 0.1 → 10% of the delta.
        let next = current.interp_to(&target, 0.02, 5.0);
        assert!((next.x - 10.0).abs() < 1e-10);

        // Successive steps converge without overshooting.
        let mut p = current;
        for _ in 0..200 {
            p = p.interp_to(&target, 0.02, 5.0);
            assert!(p.x <= 100.0);
        }
        assert!(p.range_to(&target) < 1.0);
    }

    /// interp_to snaps when the step would cover the whole delta.
    #[test]
    fn test_interp_to_clamps_to_target() {
        let current = Position::new(0.0, 0.0, 0.0);
        let target = Position::new(100.0, 0.0, 0.0);

        // dt * speed >= 1 → lands exactly on target.
        let next = current.interp_to(&target, 1.0, 5.0);
        assert_eq!(next, target);

        // Non-positive speed snaps to target.
        let next = current.interp_to(&target, 0.02, 0.0);
        assert_eq!(next, target);

        // Negligible delta snaps to target.
        let near = Position::new(100.0 - 1e-6, 0.0, 0.0);
        let next = near.interp_to(&target, 0.02, 5.0);
        assert_eq!(next, target);
    }

    /// with_speed preserves direction; zero velocity stays zero.
    #[test]
    fn test_velocity_with_speed() {
        let v = Velocity::new(300.0, 400.0, 0.0);
        let scaled = v.with_speed(100.0);
        assert!((scaled.x - 60.0).abs() < 1e-10);
        assert!((scaled.y - 80.0).abs() < 1e-10);
        assert!((scaled.speed() - 100.0).abs() < 1e-10);

        let zero = Velocity::default();
        let still_zero = zero.with_speed(100.0);
        assert_eq!(still_zero, Velocity::default());
    }

    #[test]
    fn test_velocity_heading() {
        // Heading north (positive Y)
        let north = Velocity::new(0.0, 10.0, 0.0);
        assert!((north.heading() - 0.0).abs() < 1e-10);

        // Heading east (positive X)
        let east = Velocity::new(10.0, 0.0, 0.0);
        let expected = std::f64::consts::FRAC_PI_2;
        assert!((east.heading() - expected).abs() < 1e-10);
    }

    /// Verify SimTime advancement.
    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        assert_eq!(time.tick, 0);
        assert_eq!(time.elapsed_secs, 0.0);

        for _ in 0..30 {
            time.advance();
        }
        assert_eq!(time.tick, 30);
        // 30 ticks at 30Hz = 1 second
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    /// Anchor state starts unarmed with no pull.
    #[test]
    fn test_anchor_state_at_spawn() {
        let state = AnchorState::at_spawn(Position::new(1.0, 2.0, 3.0), 1000.0);
        assert!(!state.is_live);
        assert!(state.pull_target.is_none());
        assert_eq!(state.spawn_location, Position::new(1.0, 2.0, 3.0));
        assert!((state.dynamic_speed - 1000.0).abs() < 1e-10);
    }
}
