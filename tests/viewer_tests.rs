//! Viewer Tests
//!
//! Tests for:
//! - Default scene setup (camera, lights)
//! - Model load: camera framing, clip registration, autoplay
//! - Button flow through the event queue: start → recognition → stop → nod
//! - Background and load failure handling
//! - Orbit from DOM pointer input
//! - Frame stepping

mod common;

use glam::Vec3;

use nod_viewer::app::dom_input::{DomPointerEvent, process_dom_event};
use nod_viewer::assets;
use nod_viewer::controller::ControlState;
use nod_viewer::director::{AMBIENT_CLIP, PRIMARY_CLIP, Role, SECONDARY_CLIP, TriggerState};
use nod_viewer::event::{EventQueue, ViewerEvent};
use nod_viewer::input::Input;
use nod_viewer::render::HeadlessRenderer;
use nod_viewer::scene::Background;
use nod_viewer::settings::ViewerSettings;
use nod_viewer::speech::{RecognitionSettings, SimulatedRecognizer, SpeechBackend};
use nod_viewer::utils::time::FrameStep;
use nod_viewer::viewer::Viewer;

const EPSILON: f32 = 1e-4;

fn simulated_settings() -> ViewerSettings {
    let mut settings = ViewerSettings::default();
    settings.speech.backend = SpeechBackend::Simulated;
    settings
}

fn viewer() -> Viewer {
    let queue = EventQueue::new();
    let recognizer = SimulatedRecognizer::new(RecognitionSettings::default(), queue.sender());
    Viewer::new(simulated_settings(), queue, Box::new(recognizer))
}

fn load(viewer: &mut Viewer, clips: &[&str]) {
    let model = assets::load_model_from_slice(&common::model_gltf(clips), None).unwrap();
    viewer.handle_event(ViewerEvent::AssetLoaded(Box::new(model)));
}

fn run_frames(viewer: &mut Viewer, renderer: &mut HeadlessRenderer, frames: usize) {
    let input = Input::new();
    for _ in 0..frames {
        viewer.frame(&input, 1.0 / 60.0, renderer);
    }
}

// ============================================================================
// Setup
// ============================================================================

#[test]
fn default_scene_has_camera_and_three_lights() {
    let viewer = viewer();
    let (node, camera) = viewer.scene.main_camera().unwrap();

    assert_eq!(node.transform.position, Vec3::new(0.0, 4.0, 10.0));
    assert!((camera.fov - 30.0_f32.to_radians()).abs() < EPSILON);
    assert_eq!(viewer.scene.iter_lights().count(), 3);
    assert_eq!(viewer.control_state(), ControlState::default());
}

#[test]
fn directional_light_position_is_normalized() {
    let viewer = viewer();
    let directional = viewer
        .scene
        .iter_lights()
        .find(|(_, light)| matches!(light.kind, nod_viewer::scene::LightKind::Directional))
        .unwrap();
    assert!((directional.0.transform.position.length() - 1.0).abs() < EPSILON);
}

#[test]
fn web_backend_is_unsupported_natively() {
    let mut settings = ViewerSettings::default();
    settings.speech.backend = SpeechBackend::Web;
    assert!(matches!(
        Viewer::with_settings(settings),
        Err(nod_viewer::NodError::SpeechUnsupported)
    ));
}

// ============================================================================
// Model load
// ============================================================================

#[test]
fn model_load_frames_camera_on_bounds() {
    let mut viewer = viewer();
    load(&mut viewer, &[]);

    // bounds (-1,0,-1)..(1,2,1): center (0,1,0), |size| = sqrt(12)
    let distance = 12.0_f32.sqrt() * 1.2;
    let expected = Vec3::new(0.0, 1.0 + 1.5, distance * 0.8);

    let camera = viewer.scene.get_node(viewer.camera_node()).unwrap();
    assert!(camera.transform.position.abs_diff_eq(expected, EPSILON));
    assert!(viewer.orbit_controls().center.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), EPSILON));
}

#[test]
fn camera_stays_put_after_framing() {
    let mut viewer = viewer();
    let mut renderer = HeadlessRenderer::new();
    load(&mut viewer, &[]);
    let framed = viewer.scene.get_node(viewer.camera_node()).unwrap().transform.position;

    run_frames(&mut viewer, &mut renderer, 3);
    let after = viewer.scene.get_node(viewer.camera_node()).unwrap().transform.position;
    assert!(after.abs_diff_eq(framed, EPSILON));
}

#[test]
fn model_load_registers_roles() {
    let mut viewer = viewer();
    load(&mut viewer, &[SECONDARY_CLIP, AMBIENT_CLIP, PRIMARY_CLIP, "unknownClip"]);

    let director = viewer.director();
    for role in [Role::PrimaryTrigger, Role::AmbientLoop, Role::SecondaryLoop] {
        assert!(director.action_for(role).is_some(), "{role:?}");
    }
    assert_eq!(viewer.animations.mixer_count(), 4);

    let ambient = viewer.animations.action(director.action_for(Role::AmbientLoop).unwrap()).unwrap();
    assert!(ambient.is_running());
    assert_eq!(director.primary_state(&viewer.animations), TriggerState::Idle);
}

#[test]
fn secondary_loop_moves_bound_node() {
    let mut viewer = viewer();
    let mut renderer = HeadlessRenderer::new();
    load(&mut viewer, &[SECONDARY_CLIP]);

    run_frames(&mut viewer, &mut renderer, 10);

    // 10 frames * 0.01s * 0.3 speed = 0.03s into a 1s clip from y=1 to y=2
    let root = viewer.model_root().unwrap();
    let head = viewer.scene.find_node_by_name(root, "Head").unwrap();
    let y = viewer.scene.get_node(head).unwrap().transform.position.y;
    assert!((y - 1.03).abs() < EPSILON, "got {y}");
}

#[test]
fn failed_load_keeps_viewer_running() {
    let mut viewer = viewer();
    let mut renderer = HeadlessRenderer::new();
    viewer.sender().send(ViewerEvent::AssetLoadFailed("boom".to_string())).unwrap();

    run_frames(&mut viewer, &mut renderer, 1);
    assert!(viewer.model_root().is_none());
    assert_eq!(renderer.frames_rendered(), 1);
}

#[test]
fn background_event_sets_scene_background() {
    let mut viewer = viewer();
    let image = nod_viewer::assets::BackgroundImage {
        width: 1,
        height: 1,
        pixels: vec![0, 0, 0, 255],
    };
    viewer.handle_event(ViewerEvent::BackgroundLoaded(std::sync::Arc::new(image)));
    assert!(matches!(viewer.scene.background, Background::Image(_)));
}

// ============================================================================
// Buttons and recognition
// ============================================================================

#[test]
fn start_stop_flow_triggers_nod() {
    let mut viewer = viewer();
    let mut renderer = HeadlessRenderer::new();
    load(&mut viewer, &[PRIMARY_CLIP]);
    let sender = viewer.sender();

    sender.send(ViewerEvent::StartClicked).unwrap();
    run_frames(&mut viewer, &mut renderer, 1);
    assert_eq!(
        viewer.control_state(),
        ControlState {
            start_enabled: false,
            stop_enabled: true
        }
    );

    // RecognitionStarted arrives on the next drain
    run_frames(&mut viewer, &mut renderer, 1);
    assert!(viewer.controller().is_recognizing());

    sender.send(ViewerEvent::StopClicked).unwrap();
    run_frames(&mut viewer, &mut renderer, 1);
    assert_eq!(viewer.control_state(), ControlState::default());
    assert_eq!(viewer.director().primary_state(&viewer.animations), TriggerState::Playing);

    let primary = viewer.director().action_for(Role::PrimaryTrigger).unwrap();
    let action = viewer.animations.action(primary).unwrap();
    assert!((action.time_scale - 5.0).abs() < EPSILON);
    assert!((action.time - 0.05).abs() < EPSILON, "one frame at 5x: {}", action.time);

    run_frames(&mut viewer, &mut renderer, 1);
    assert!(!viewer.controller().is_recognizing());
}

#[test]
fn stop_before_recognition_starts_does_not_nod() {
    let mut viewer = viewer();
    load(&mut viewer, &[PRIMARY_CLIP]);

    viewer.handle_event(ViewerEvent::StartClicked);
    viewer.handle_event(ViewerEvent::StopClicked);

    assert_eq!(viewer.director().primary_state(&viewer.animations), TriggerState::Idle);
    assert!(viewer.control_state().stop_enabled);
}

#[test]
fn stop_without_nod_clip_is_harmless() {
    let mut viewer = viewer();
    let mut renderer = HeadlessRenderer::new();
    load(&mut viewer, &["unknownClip"]);

    viewer.handle_event(ViewerEvent::StartClicked);
    run_frames(&mut viewer, &mut renderer, 1);
    viewer.handle_event(ViewerEvent::StopClicked);

    assert_eq!(viewer.control_state(), ControlState::default());
    assert!(viewer.director().action_for(Role::PrimaryTrigger).is_none());
}

#[test]
fn recognition_error_leaves_buttons() {
    let mut viewer = viewer();
    viewer.handle_event(ViewerEvent::StartClicked);
    viewer.process_events();
    viewer.handle_event(ViewerEvent::RecognitionError("no-speech".to_string()));

    assert!(viewer.controller().is_recognizing());
    assert!(viewer.control_state().stop_enabled);
}

#[test]
fn dom_drag_orbits_camera() {
    let mut viewer = viewer();
    let mut renderer = HeadlessRenderer::new();
    let start = viewer.scene.get_node(viewer.camera_node()).unwrap().transform.position;
    let center = viewer.orbit_controls().center;

    let mut input = Input::new();
    process_dom_event(&mut input, DomPointerEvent::Resize { width: 800, height: 600 });
    process_dom_event(&mut input, DomPointerEvent::Down { button: 0, x: 400.0, y: 300.0 });
    process_dom_event(&mut input, DomPointerEvent::Move { x: 500.0, y: 300.0 });
    viewer.frame(&input, 1.0 / 60.0, &mut renderer);

    let moved = viewer.scene.get_node(viewer.camera_node()).unwrap().transform.position;
    assert!(!moved.abs_diff_eq(start, 1e-3), "camera did not orbit");
    assert!(((moved - center).length() - (start - center).length()).abs() < 1e-3);
}

#[test]
fn dom_wheel_zooms_towards_target() {
    let mut viewer = viewer();
    let mut renderer = HeadlessRenderer::new();
    let center = viewer.orbit_controls().center;
    let before = (viewer.scene.get_node(viewer.camera_node()).unwrap().transform.position - center).length();

    let mut input = Input::new();
    process_dom_event(
        &mut input,
        DomPointerEvent::Wheel {
            delta_x: 0.0,
            delta_y: -100.0,
            delta_mode: 0,
        },
    );
    viewer.frame(&input, 1.0 / 60.0, &mut renderer);

    let after = (viewer.scene.get_node(viewer.camera_node()).unwrap().transform.position - center).length();
    assert!((after - before * 0.95_f32.powf(1.2)).abs() < 1e-3, "{before} -> {after}");
}

// ============================================================================
// Frame stepping
// ============================================================================

#[test]
fn fixed_step_is_default() {
    let mut viewer = viewer();
    let mut renderer = HeadlessRenderer::new();
    run_frames(&mut viewer, &mut renderer, 5);

    assert_eq!(viewer.clock().step(), FrameStep::Fixed(0.01));
    assert!((viewer.clock().animation_time() - 0.05).abs() < EPSILON);
    assert_eq!(renderer.frames_rendered(), 5);
}

#[test]
fn real_time_step_follows_wall_clock() {
    let queue = EventQueue::new();
    let recognizer = SimulatedRecognizer::new(RecognitionSettings::default(), queue.sender());
    let mut settings = simulated_settings();
    settings.animation.frame_step = FrameStep::RealTime;
    let mut viewer = Viewer::new(settings, queue, Box::new(recognizer));
    let mut renderer = HeadlessRenderer::new();

    viewer.frame(&Input::new(), 0.25, &mut renderer);
    assert!((viewer.clock().animation_time() - 0.25).abs() < EPSILON);
}

#[test]
fn renderer_sees_lights_and_camera() {
    let mut viewer = viewer();
    let mut renderer = HeadlessRenderer::new();
    run_frames(&mut viewer, &mut renderer, 1);

    let frame = renderer.last_frame().unwrap();
    assert_eq!(frame.light_count, 3);
    assert!(!frame.has_background_image);
}
