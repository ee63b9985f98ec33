use rect_collide::{
    Body, BodyType, CollisionConfig, CollisionWorld, Vector2,
    bodies::body_flags::BodyFlags,
    core::{BodyEventType, CollisionEventType},
    error::PhysicsError,
};
use approx::assert_relative_eq;

fn square(x: f32, y: f32, side: f32) -> Body {
    Body::new_dynamic(Vector2::new(x, y), Vector2::new(side, side))
}

#[test]
fn test_config_validation() {
    assert!(CollisionConfig::default().validate().is_ok());
    assert!(CollisionWorld::with_config(CollisionConfig::with_cell_size(32.0)).is_ok());

    let invalid = [
        CollisionConfig::with_cell_size(0.0),
        CollisionConfig::with_cell_size(-10.0),
        CollisionConfig::with_cell_size(f32::NAN),
        CollisionConfig::with_cell_size(f32::INFINITY),
        CollisionConfig { epsilon: -1.0, ..CollisionConfig::default() },
        CollisionConfig { max_iterations: 0, ..CollisionConfig::default() },
    ];

    for config in invalid {
        assert!(matches!(
            CollisionWorld::with_config(config),
            Err(PhysicsError::InvalidParameter(_))
        ));
    }
}

#[test]
fn test_body_lifecycle() {
    let mut world = CollisionWorld::new();
    let a = world.add_body(square(0.0, 0.0, 10.0));
    let b = world.add_body(square(50.0, 0.0, 10.0));
    assert_eq!(world.body_count(), 2);

    let removed = world.remove_body(a).unwrap();
    assert_eq!(removed.get_position(), Vector2::new(0.0, 0.0));
    assert_eq!(world.body_count(), 1);

    assert!(matches!(world.get_body(a), Err(PhysicsError::ResourceNotFound(_))));
    assert!(matches!(world.remove_body(a), Err(PhysicsError::ResourceNotFound(_))));
    assert!(world.get_body(b).is_ok());

    let kinds: Vec<_> = world
        .events_mut()
        .drain_bodies()
        .map(|event| (event.event_type, event.body))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (BodyEventType::Added, a),
            (BodyEventType::Added, b),
            (BodyEventType::Removed, a),
        ]
    );
}

#[test]
fn test_integrate_moves_only_dynamic_bodies() {
    let mut world = CollisionWorld::new();
    let mover = world.add_body(square(0.0, 0.0, 10.0).with_velocity(Vector2::new(2.0, -1.0)));
    let wall = world.add_body(
        Body::new_static(Vector2::new(500.0, 0.0), Vector2::new(10.0, 10.0))
            .with_velocity(Vector2::new(5.0, 5.0)),
    );

    world.integrate(0.5);

    assert_relative_eq!(world.get_body(mover).unwrap().get_position(), Vector2::new(1.0, -0.5));
    assert_eq!(world.get_body(wall).unwrap().get_position(), Vector2::new(500.0, 0.0));
}

#[test]
fn test_step_separates_bodies_and_reports_begin_then_end() {
    let mut world = CollisionWorld::new();
    let a = world.add_body(square(0.0, 0.0, 10.0));
    let b = world.add_body(square(5.0, 0.0, 10.0));

    let report = world.step(0.0);
    assert!(report.converged);
    assert_eq!(world.get_tick(), 1);
    assert!(world.detector().are_colliding(a, b));

    let begins: Vec<_> = world.events().collisions_of_type(CollisionEventType::Begin).collect();
    assert_eq!(begins.len(), 1);
    assert_eq!(begins[0].body_a, a);
    assert_eq!(begins[0].body_b, b);

    // Touching after resolution, so the next pass ends the contact
    world.step(0.0);
    assert_eq!(world.get_tick(), 2);
    assert!(!world.get_body(a).unwrap().is_colliding());

    let first = world.events_mut().pop_collision().unwrap();
    assert_eq!(first.event_type, CollisionEventType::Begin);

    let rest: Vec<_> = world.events_mut().drain_collisions().collect();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].event_type, CollisionEventType::End);
    assert_eq!(rest[0].pair(), first.pair());
    assert!(world.events_mut().pop_collision().is_none());
}

#[test]
fn test_trigger_contact_persists_until_exit() {
    let mut world = CollisionWorld::new();
    let player = world.add_body(square(0.0, 0.0, 10.0).with_velocity(Vector2::new(1.0, 0.0)));
    let zone = world.add_body(Body::new_trigger(Vector2::new(3.0, 0.0), Vector2::new(10.0, 10.0)));
    world.events_mut().clear();

    world.step(1.0);
    world.step(1.0);

    // Triggers are never pushed
    assert_eq!(world.get_body(zone).unwrap().get_position(), Vector2::new(3.0, 0.0));
    assert_eq!(world.get_body(player).unwrap().get_position(), Vector2::new(2.0, 0.0));
    assert_eq!(world.get_body(player).unwrap().get_velocity(), Vector2::new(1.0, 0.0));

    world.get_body_mut(player).unwrap().set_position(Vector2::new(300.0, 0.0));
    world.step(0.0);

    assert_eq!(world.events().collision_count(), 3);
    let kinds: Vec<_> = world
        .events()
        .collisions_involving(zone)
        .map(|event| event.event_type)
        .collect();
    assert_eq!(
        kinds,
        vec![CollisionEventType::Begin, CollisionEventType::Persist, CollisionEventType::End]
    );
}

#[test]
fn test_disabled_body_is_ignored_until_enabled() {
    let mut world = CollisionWorld::new();
    let a = world.add_body(square(0.0, 0.0, 10.0));
    let b = world.add_body(square(4.0, 0.0, 10.0).with_flags(BodyFlags::DISABLED));

    world.step(0.0);
    assert!(!world.get_body(a).unwrap().is_colliding());
    assert_eq!(world.get_body(b).unwrap().get_position(), Vector2::new(4.0, 0.0));

    world.get_body_mut(b).unwrap().set_flags(BodyFlags::empty());
    let stats = world.detect_collisions();
    assert_eq!(stats.colliding_pairs, 1);
    assert!(world.get_body(a).unwrap().is_colliding_with(b));
}

#[test]
fn test_body_changes_take_effect_next_tick() {
    let config = CollisionConfig { max_iterations: 4, ..CollisionConfig::with_cell_size(64.0) };
    let mut world = CollisionWorld::with_config(config.clone()).unwrap();
    assert_eq!(world.get_config(), &config);

    let a = world.add_body(square(0.0, 0.0, 10.0));
    let b = world.add_body(square(20.0, 0.0, 10.0));
    assert_eq!(world.events_mut().pop_body().map(|event| event.body), Some(a));
    assert_eq!(world.events_mut().pop_body().map(|event| event.body), Some(b));
    assert!(world.events_mut().pop_body().is_none());
    assert!(world.events().is_empty());

    // Growing A makes it reach B; turning A static leaves B to take the correction
    {
        let body = world.get_body_mut(a).unwrap();
        body.set_size(Vector2::new(34.0, 10.0));
        body.set_body_type(BodyType::Static);
        assert_eq!(body.get_body_type(), BodyType::Static);
        assert!(body.get_flags().is_empty());
    }

    world.step(0.0);

    assert_eq!(world.get_body(a).unwrap().get_position(), Vector2::new(0.0, 0.0));
    assert_relative_eq!(world.get_body(b).unwrap().get_position(), Vector2::new(22.0, 0.0));
}
