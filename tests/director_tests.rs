//! Animation Director Tests
//!
//! Tests for:
//! - Name-based role assignment and policy application
//! - Autoplay of the looping roles
//! - The nod trigger (restart semantics, no-op without a primary clip)
//! - Duplicate role assignment

use std::sync::Arc;

use nod_viewer::animation::{ActionRef, AnimationClip, AnimationMixer, AnimationSystem, LoopMode};
use nod_viewer::director::{
    AMBIENT_CLIP, AnimationDirector, ClipPolicy, PRIMARY_CLIP, Role, SECONDARY_CLIP, TriggerState,
};
use nod_viewer::scene::Scene;

const EPSILON: f32 = 1e-5;

fn add_clip(system: &mut AnimationSystem, name: &str, duration: f32) -> ActionRef {
    let mut mixer = AnimationMixer::new();
    let action = mixer.clip_action(Arc::new(AnimationClip::empty(name, duration)), Vec::new());
    let mixer = system.add_mixer(mixer);
    ActionRef { mixer, action }
}

fn register(director: &mut AnimationDirector, system: &mut AnimationSystem, name: &str) -> ActionRef {
    let reference = add_clip(system, name, 2.0);
    director.register_clip(name, reference, system);
    reference
}

// ============================================================================
// Role assignment
// ============================================================================

#[test]
fn role_table_matches_exact_names() {
    let director = AnimationDirector::new();
    assert_eq!(director.role_of(PRIMARY_CLIP), Some(Role::PrimaryTrigger));
    assert_eq!(director.role_of(AMBIENT_CLIP), Some(Role::AmbientLoop));
    assert_eq!(director.role_of(SECONDARY_CLIP), Some(Role::SecondaryLoop));

    assert_eq!(director.role_of("see"), None);
    assert_eq!(director.role_of("SEE2"), None);
    assert_eq!(director.role_of("[保留アクション].002"), None);
}

#[test]
fn roles_do_not_depend_on_registration_order() {
    let orders = [
        [PRIMARY_CLIP, AMBIENT_CLIP, SECONDARY_CLIP],
        [SECONDARY_CLIP, PRIMARY_CLIP, AMBIENT_CLIP],
        [AMBIENT_CLIP, SECONDARY_CLIP, PRIMARY_CLIP],
    ];

    for order in orders {
        let mut system = AnimationSystem::new();
        let mut director = AnimationDirector::new();
        for name in order {
            let reference = register(&mut director, &mut system, name);
            let role = director.role_of(name).unwrap();
            assert_eq!(director.action_for(role), Some(reference), "{name} in {order:?}");
        }
    }
}

#[test]
fn unknown_clip_is_left_untouched() {
    let mut system = AnimationSystem::new();
    let mut director = AnimationDirector::new();
    let reference = register(&mut director, &mut system, "unknownClip");

    let action = system.action(reference).unwrap();
    assert!(!action.is_scheduled());
    assert_eq!(action.loop_mode, LoopMode::Repeat);
    assert!((action.time_scale - 1.0).abs() < EPSILON);
    for role in [Role::PrimaryTrigger, Role::AmbientLoop, Role::SecondaryLoop] {
        assert_eq!(director.action_for(role), None);
    }
}

#[test]
fn duplicate_name_last_registration_wins() {
    let mut system = AnimationSystem::new();
    let mut director = AnimationDirector::new();
    let first = register(&mut director, &mut system, SECONDARY_CLIP);
    let second = register(&mut director, &mut system, SECONDARY_CLIP);

    assert_ne!(first, second);
    assert_eq!(director.action_for(Role::SecondaryLoop), Some(second));
}

// ============================================================================
// Policies
// ============================================================================

#[test]
fn looping_roles_autoplay() {
    let mut system = AnimationSystem::new();
    let mut director = AnimationDirector::new();
    let ambient = register(&mut director, &mut system, AMBIENT_CLIP);
    let secondary = register(&mut director, &mut system, SECONDARY_CLIP);

    for reference in [ambient, secondary] {
        let action = system.action(reference).unwrap();
        assert!(action.is_running());
        assert_eq!(action.loop_mode, LoopMode::Repeat);
    }
}

#[test]
fn secondary_loop_runs_at_reduced_speed() {
    let mut system = AnimationSystem::new();
    let mut director = AnimationDirector::new();
    let secondary = register(&mut director, &mut system, SECONDARY_CLIP);

    assert!((system.action(secondary).unwrap().time_scale - 0.3).abs() < EPSILON);
}

#[test]
fn primary_is_configured_but_idle() {
    let mut system = AnimationSystem::new();
    let mut director = AnimationDirector::new();
    let primary = register(&mut director, &mut system, PRIMARY_CLIP);

    let action = system.action(primary).unwrap();
    assert!(!action.is_scheduled());
    assert_eq!(action.loop_mode, LoopMode::Once);
    assert!(action.clamp_when_finished);
    assert_eq!(director.primary_state(&system), TriggerState::Idle);
}

#[test]
fn custom_policy_table_is_honoured() {
    let policies = vec![ClipPolicy {
        clip_name: "wave".to_string(),
        role: Role::PrimaryTrigger,
        loop_mode: LoopMode::Once,
        autoplay: false,
        time_scale: 1.0,
        clamp_when_finished: false,
    }];
    let mut system = AnimationSystem::new();
    let mut director = AnimationDirector::with_policies(policies, 2.0);
    let wave = register(&mut director, &mut system, "wave");
    register(&mut director, &mut system, PRIMARY_CLIP);

    assert_eq!(director.action_for(Role::PrimaryTrigger), Some(wave));
    assert!(director.trigger_primary(&mut system));
    assert!((system.action(wave).unwrap().time_scale - 2.0).abs() < EPSILON);
}

// ============================================================================
// Trigger
// ============================================================================

#[test]
fn trigger_without_primary_is_noop() {
    let mut system = AnimationSystem::new();
    let mut director = AnimationDirector::new();
    let unknown = register(&mut director, &mut system, "unknownClip");

    assert!(!director.trigger_primary(&mut system));
    assert!(!system.action(unknown).unwrap().is_scheduled());
}

#[test]
fn trigger_restarts_from_any_state() {
    let mut system = AnimationSystem::new();
    let mut scene = Scene::new();
    let mut director = AnimationDirector::new();
    let primary = register(&mut director, &mut system, PRIMARY_CLIP);

    // mid-playback
    assert!(director.trigger_primary(&mut system));
    system.update(0.1, &mut scene);
    assert!(system.action(primary).unwrap().time > 0.0);
    assert!(director.trigger_primary(&mut system));
    assert!(system.action(primary).unwrap().time.abs() < EPSILON);

    // finished and clamped
    system.update(10.0, &mut scene);
    assert!(system.action(primary).unwrap().paused);
    assert_eq!(director.primary_state(&system), TriggerState::Idle);
    assert!(director.trigger_primary(&mut system));

    let action = system.action(primary).unwrap();
    assert!(action.time.abs() < EPSILON);
    assert!((action.time_scale - 5.0).abs() < EPSILON);
    assert!(action.is_running());
    assert_eq!(director.primary_state(&system), TriggerState::Playing);
}

#[test]
fn nod_plays_to_the_end_and_holds() {
    let mut system = AnimationSystem::new();
    let mut scene = Scene::new();
    let mut director = AnimationDirector::new();
    let primary = register(&mut director, &mut system, PRIMARY_CLIP);

    director.trigger_primary(&mut system);
    // 2s clip at 5x with a 0.01s step: 40 frames
    for _ in 0..39 {
        system.update(0.01, &mut scene);
    }
    assert_eq!(director.primary_state(&system), TriggerState::Playing);
    system.update(0.01, &mut scene);
    system.update(0.01, &mut scene);

    let action = system.action(primary).unwrap();
    assert!(action.paused);
    assert!((action.time - 2.0).abs() < EPSILON);
}

#[test]
fn end_to_end_registration_then_trigger() {
    let mut system = AnimationSystem::new();
    let mut director = AnimationDirector::new();
    let see2 = register(&mut director, &mut system, SECONDARY_CLIP);
    let ambient = register(&mut director, &mut system, AMBIENT_CLIP);
    let primary = register(&mut director, &mut system, PRIMARY_CLIP);

    let action = system.action(see2).unwrap();
    assert!(action.is_running());
    assert!((action.time_scale - 0.3).abs() < EPSILON);

    let action = system.action(ambient).unwrap();
    assert!(action.is_running());
    assert!((action.time_scale - 1.0).abs() < EPSILON);

    assert!(!system.action(primary).unwrap().is_scheduled());

    assert!(director.trigger_primary(&mut system));
    let action = system.action(primary).unwrap();
    assert!(action.time.abs() < EPSILON);
    assert!((action.time_scale - 5.0).abs() < EPSILON);
    assert!(action.is_running());
}

#[test]
fn single_pose_nod_finishes_immediately() {
    let mut system = AnimationSystem::new();
    let mut scene = Scene::new();
    let mut director = AnimationDirector::new();
    let reference = add_clip(&mut system, PRIMARY_CLIP, 0.0);
    director.register_clip(PRIMARY_CLIP, reference, &mut system);

    assert!(director.trigger_primary(&mut system));
    assert_eq!(director.primary_state(&system), TriggerState::Playing);

    system.update(0.01, &mut scene);
    assert_eq!(director.primary_state(&system), TriggerState::Idle);
    assert!(system.action(reference).unwrap().paused);
}
