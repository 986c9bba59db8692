mod support;

use glam::Vec2;

use buster::engine::animation::{clips, frames};
use buster::engine::input::Action::{Down, Fire, Left, Right, Up};
use buster::engine::{Body, Health, Owner, ProjectileSink, Sprite};
use buster::player::{player_fsm_from, Entry, PlayerEvent, PlayerStateId::*};
use buster::scene::prefabs::spawn_lobber;
use buster::scene::Scene;
use buster::{GameApp, GameError};
use support::{grounded_app, grounded_scene, held, hold, none, quiet_config, run_until};

#[test]
fn teleport_hands_over_to_idle_when_the_beam_in_finishes() {
    let mut app = GameApp::new(Scene::new(quiet_config()));

    let report = app.update(none()).unwrap();
    assert_eq!(report.state, Some(Teleport));
    assert_eq!(app.scene().player.sprite.current_clip(), Some(clips::TELEPORT));

    let frames = run_until(&mut app, &none(), Idle, 120).expect("never reached Idle");
    assert!((60..=75).contains(&frames), "took {frames} frames");
    assert_eq!(app.fsm().previous(), Some(Teleport));
}

#[test]
fn idle_fires_one_bullet_per_press_in_the_facing_direction() {
    let mut app = grounded_app(Idle);
    hold(&mut app, &none(), 2);
    hold(&mut app, &held(&[Fire]), 20);

    let bullets = app.scene().bullets.as_ref().unwrap();
    assert_eq!(bullets.count_owned_by(Owner::Player), 1);
    let shot = bullets.last_spawned().unwrap();
    assert_eq!(bullets.velocity_of(shot), Some(Vec2::new(350.0, 0.0)));

    app.scene_mut().player.sprite.set_flip_x(true);
    hold(&mut app, &none(), 2);
    hold(&mut app, &held(&[Fire]), 20);

    let bullets = app.scene().bullets.as_ref().unwrap();
    assert_eq!(bullets.count_owned_by(Owner::Player), 2);
    let shot = bullets.last_spawned().unwrap();
    assert_eq!(bullets.velocity_of(shot), Some(Vec2::new(-350.0, 0.0)));
    assert_eq!(app.fsm().current(), Some(Idle));
}

#[test]
fn idle_shot_still_leaves_when_the_player_breaks_into_a_run() {
    let mut app = grounded_app(Idle);
    hold(&mut app, &none(), 2);
    app.update(held(&[Fire])).unwrap();

    let report = hold(&mut app, &held(&[Right, Fire]), 30);
    assert_eq!(report.state, Some(Walk));
    let bullets = app.scene().bullets.as_ref().unwrap();
    assert_eq!(bullets.count_owned_by(Owner::Player), 1);
}

#[test]
fn idle_entered_with_fire_held_waits_for_a_fresh_press() {
    let mut scene = grounded_scene();
    let mut fsm = player_fsm_from(Walk);
    scene.input = held(&[Right]);
    fsm.step(&mut scene).unwrap();

    scene.input = held(&[Fire]);
    fsm.transition(Idle, &mut scene).unwrap();
    for _ in 0..10 {
        fsm.step(&mut scene).unwrap();
    }
    assert_ne!(scene.player.sprite.current_clip(), Some(clips::SHOOT));

    scene.input = none();
    fsm.step(&mut scene).unwrap();
    scene.input = held(&[Fire]);
    fsm.step(&mut scene).unwrap();
    assert_eq!(scene.player.sprite.current_clip(), Some(clips::SHOOT));
}

#[test]
fn walk_stops_accelerating_at_top_speed() {
    let mut app = grounded_app(Walk);
    app.scene_mut().player.body.velocity.x = 220.0;

    let report = app.update(held(&[Right])).unwrap();
    assert_eq!(report.state, Some(Walk));
    assert_eq!(app.scene().player.body.acceleration.x, 0.0);
    assert_eq!(app.scene().player.sprite.current_clip(), Some(clips::RUNNING));

    app.scene_mut().player.body.velocity.x = 100.0;
    app.update(held(&[Right])).unwrap();
    assert_eq!(app.scene().player.body.acceleration.x, 600.0);
}

#[test]
fn walk_shot_leaves_on_the_fire_frame_then_idles() {
    let mut app = grounded_app(Idle);
    app.update(none()).unwrap();
    assert_eq!(app.update(held(&[Right])).unwrap().state, Some(Walk));
    assert_eq!(app.update(held(&[Right, Fire])).unwrap().state, Some(WalkShoot));

    run_until(&mut app, &held(&[Right, Fire]), Idle, 30).expect("shot never left");
    hold(&mut app, &held(&[Right, Fire]), 10);

    let bullets = app.scene().bullets.as_ref().unwrap();
    assert_eq!(bullets.count_owned_by(Owner::Player), 1);
}

#[test]
fn releasing_slide_restores_the_standing_box_in_the_same_step() {
    let standing = quiet_config().tuning.standing_box();
    let mut app = grounded_app(Walk);
    app.scene_mut().player.body.velocity.x = 200.0;

    let report = app.update(held(&[Right, Down])).unwrap();
    assert_eq!(report.state, Some(Slide));
    let crouched = app.scene().player.body.hitbox;
    assert_eq!(crouched.size, Vec2::new(40.0, 23.0));
    assert_eq!(crouched.offset, Vec2::new(6.0, 6.0));

    let report = app.update(none()).unwrap();
    assert_eq!(report.state, Some(Idle));
    assert_eq!(app.scene().player.body.hitbox, standing);
}

#[test]
fn holding_slide_from_a_standstill_waits_for_speed_and_stays_grounded() {
    let mut app = grounded_app(Idle);
    app.update(none()).unwrap();

    let states: Vec<_> = (0..12)
        .map(|_| app.update(held(&[Right, Down])).unwrap().state)
        .collect();
    let first_slide = states
        .iter()
        .position(|s| *s == Some(Slide))
        .expect("never slid");
    assert!(first_slide > 1, "slid before picking up speed: {states:?}");
    assert!(
        states[first_slide..].iter().all(|s| *s == Some(Slide)),
        "slide did not hold: {states:?}"
    );

    let report = hold(&mut app, &none(), 40);
    assert_eq!(report.state, Some(Idle));
    let body = &app.scene().player.body;
    assert!(body.on_floor);
    assert!((body.position.y - 360.0).abs() < 1e-3, "y = {}", body.position.y);
}

#[test]
fn slide_jumps_on_up_with_the_standing_box_back() {
    let standing = quiet_config().tuning.standing_box();
    let mut app = grounded_app(Walk);
    app.scene_mut().player.body.velocity.x = 200.0;
    assert_eq!(app.update(held(&[Right, Down])).unwrap().state, Some(Slide));

    let report = app.update(held(&[Up])).unwrap();
    assert_eq!(report.state, Some(Jump));
    assert_eq!(app.scene().player.body.hitbox, standing);
    assert!(app.scene().player.body.velocity.y < 0.0);
}

#[test]
fn jump_without_keys_lands_back_in_idle() {
    let mut app = grounded_app(Idle);
    app.update(none()).unwrap();
    assert_eq!(app.update(held(&[Up])).unwrap().state, Some(Jump));

    run_until(&mut app, &none(), Idle, 120).expect("never landed");
    assert_eq!(app.fsm().previous(), Some(Jump));
    assert!(app.scene().player.body.on_floor);
}

#[test]
fn drift_shot_fires_at_once_and_only_once_per_press() {
    let mut app = grounded_app(Idle);
    app.update(none()).unwrap();
    app.update(held(&[Up])).unwrap();
    assert_eq!(app.update(held(&[Up])).unwrap().state, Some(Drift));

    app.update(held(&[Up, Fire])).unwrap();
    assert_eq!(app.scene().player.sprite.frame_name(), frames::AIR_SHOT);
    let bullets = app.scene().bullets.as_ref().unwrap();
    assert_eq!(bullets.count_owned_by(Owner::Player), 1);

    let report = hold(&mut app, &held(&[Up, Fire]), 5);
    assert_eq!(report.state, Some(Drift));
    let bullets = app.scene().bullets.as_ref().unwrap();
    assert_eq!(bullets.count_owned_by(Owner::Player), 1);
}

#[test]
fn drift_shrinks_the_box_and_landing_restores_it() {
    let standing = quiet_config().tuning.standing_box();
    let mut app = grounded_app(Idle);
    app.update(none()).unwrap();

    assert_eq!(app.update(held(&[Up])).unwrap().state, Some(Jump));
    assert_eq!(app.update(held(&[Up])).unwrap().state, Some(Drift));
    let airborne = app.scene().player.body.hitbox;
    assert_eq!(airborne.size, Vec2::new(37.0, 36.0));
    assert_eq!(airborne.offset, Vec2::new(0.0, 2.0));

    hold(&mut app, &held(&[Left]), 3);
    assert!(app.scene().player.sprite.flip_x());

    run_until(&mut app, &none(), Idle, 120).expect("never landed");
    assert_eq!(app.scene().player.body.hitbox, standing);
}

#[test]
fn ground_hit_costs_health_and_recovers_to_idle() {
    let mut app = grounded_app(Idle);
    hold(&mut app, &none(), 2);

    let center = app.scene().player.body.center();
    app.scene_mut()
        .bullets
        .as_mut()
        .unwrap()
        .spawn(center, Vec2::ZERO, Owner::Enemy);

    let report = app.update(none()).unwrap();
    assert_eq!(report.hits, 1);
    assert_eq!(report.state, Some(GroundDamage));
    assert_eq!(report.health, 14);
    assert!(app.scene().player.vitality.is_hurt());

    run_until(&mut app, &none(), Idle, 60).expect("never recovered");
    assert!(!app.scene().player.vitality.is_hurt());
    assert_eq!(app.scene().player.vitality.health(), 14);
}

#[test]
fn running_into_a_lobber_stops_the_player_and_hurts() {
    let mut app = grounded_app(Idle);
    app.update(none()).unwrap();
    {
        let scene = app.scene_mut();
        spawn_lobber(
            &mut scene.enemies,
            &scene.animations,
            Vec2::new(110.0, 375.0),
            &scene.config.lobber,
        );
        scene.player.body.velocity = Vec2::new(120.0, 0.0);
    }

    let report = app.update(none()).unwrap();
    assert_eq!(report.hits, 1);
    assert_eq!(report.state, Some(GroundDamage));
    assert_eq!(report.health, 14);
    assert_eq!(app.scene().player.body.velocity, Vec2::ZERO);
}

#[test]
fn last_point_of_health_ends_in_defeat() {
    let mut app = grounded_app(Idle);
    app.scene_mut().player.vitality.set_health(1).unwrap();
    app.update(none()).unwrap();

    let center = app.scene().player.body.center();
    app.scene_mut()
        .bullets
        .as_mut()
        .unwrap()
        .spawn(center, Vec2::ZERO, Owner::Enemy);

    let report = app.update(none()).unwrap();
    assert_eq!(report.state, Some(GroundDamage));
    assert!(!report.alive);

    run_until(&mut app, &none(), Defeated, 60).expect("never defeated");
    let report = hold(&mut app, &held(&[Right]), 10);
    assert_eq!(report.state, Some(Defeated));
    assert_eq!(app.scene().player.body.velocity.x, 0.0);
}

#[test]
fn air_hit_falls_back_into_drift() {
    let standing = quiet_config().tuning.standing_box();
    let mut scene = grounded_scene();
    scene.player.body.position.y = 200.0;
    scene.player.body.on_floor = false;

    let mut fsm = player_fsm_from(Drift);
    fsm.step(&mut scene).unwrap();
    fsm.transition_with(AirDamage, &mut scene, Entry::Hit { damage: 3 }).unwrap();

    assert_eq!(fsm.previous(), Some(Drift));
    assert_eq!(scene.player.vitality.health(), 12);
    assert_eq!(scene.player.body.hitbox, standing);

    fsm.post(PlayerEvent::AnimationComplete(clips::AIR_DAMAGE.into()));
    fsm.step(&mut scene).unwrap();
    assert_eq!(fsm.current(), Some(Drift));
}

#[test]
fn slide_hit_stays_crouched_until_the_reaction_ends() {
    let standing = quiet_config().tuning.standing_box();
    let mut scene = grounded_scene();
    scene.player.body.velocity.x = 200.0;
    scene.input = held(&[Right, Down]);

    let mut fsm = player_fsm_from(Walk);
    fsm.step(&mut scene).unwrap();
    assert_eq!(fsm.current(), Some(Slide));

    fsm.transition_with(SlideDamage, &mut scene, Entry::Hit { damage: 1 }).unwrap();
    assert_eq!(scene.player.body.hitbox.size, Vec2::new(40.0, 23.0));
    assert_eq!(scene.player.vitality.health(), 14);

    scene.input = none();
    fsm.post(PlayerEvent::AnimationComplete(clips::SLIDE_DAMAGE.into()));
    fsm.step(&mut scene).unwrap();
    assert_eq!(fsm.current(), Some(Idle));
    assert_eq!(scene.player.body.hitbox, standing);
}

#[test]
fn shooting_without_a_bullet_group_is_a_configuration_error() {
    let scene = grounded_scene().without_bullets();
    let mut app = GameApp::with_fsm(scene, player_fsm_from(Idle));
    app.update(none()).unwrap();

    let err = (0..20)
        .find_map(|_| app.update(held(&[Fire])).err())
        .expect("shot never attempted");
    assert!(matches!(err, GameError::Configuration(_)));
}
