//! The viewer: scene, animation, speech and controls in one frame loop.
//!
//! A frame runs in a fixed order:
//!
//! 1. drain pending [`ViewerEvent`]s and handle them in arrival order
//! 2. update orbit controls from input
//! 3. advance every animation mixer
//! 4. refresh world matrices
//! 5. hand the scene to the render backend
//!
//! Nothing outside the frame thread touches the scene. Loaders and
//! recognizers only send events.

use std::sync::Arc;

use glam::Vec3;

use crate::animation::{ActionRef, AnimationMixer, AnimationSystem, Binder};
use crate::assets::{AssetLoader, ModelData};
use crate::controller::{ControlState, RecognitionController};
use crate::director::AnimationDirector;
use crate::errors::Result;
use crate::event::{EventQueue, EventSender, ViewerEvent};
use crate::input::Input;
use crate::render::RenderBackend;
use crate::scene::{Background, Camera, Light, NodeHandle, Scene, color_from_hex};
use crate::settings::{LightSettings, ViewerSettings};
use crate::speech::{SpeechRecognizer, create_recognizer};
use crate::utils::orbit_control::OrbitControls;
use crate::utils::time::FrameClock;

pub struct Viewer {
    settings: ViewerSettings,

    pub scene: Scene,
    pub animations: AnimationSystem,

    director: AnimationDirector,
    controller: RecognitionController,
    recognizer: Box<dyn SpeechRecognizer>,

    events: EventQueue,
    controls: OrbitControls,
    clock: FrameClock,

    camera_node: NodeHandle,
    model_root: Option<NodeHandle>,
}

impl Viewer {
    /// Builds the default scene: camera, lights and orbit controls.
    ///
    /// `recognizer` must report its lifecycle through a sender obtained from
    /// `events`.
    #[must_use]
    pub fn new(settings: ViewerSettings, events: EventQueue, recognizer: Box<dyn SpeechRecognizer>) -> Self {
        let mut scene = Scene::new();

        let cam = &settings.camera;
        let aspect = settings.window.width as f32 / settings.window.height.max(1) as f32;
        let camera_node = scene.add_camera(Camera::new_perspective(cam.fov, aspect, cam.near, cam.far));
        if let Some(node) = scene.get_node_mut(camera_node) {
            node.transform.position = cam.position;
            node.transform.look_at(cam.target, Vec3::Y);
        }
        scene.active_camera = Some(camera_node);

        for light in &settings.lights {
            add_light(&mut scene, light);
        }

        let controls = OrbitControls::new(&settings.orbit, cam.position, cam.target);
        let director = AnimationDirector::with_policies(
            settings.animation.policies.clone(),
            settings.animation.trigger_time_scale,
        );
        let clock = FrameClock::new(settings.animation.frame_step);

        Self {
            settings,
            scene,
            animations: AnimationSystem::new(),
            director,
            controller: RecognitionController::new(),
            recognizer,
            events,
            controls,
            clock,
            camera_node,
            model_root: None,
        }
    }

    /// Creates a viewer with the recognizer selected in `settings.speech`.
    ///
    /// Fails with [`NodError::SpeechUnsupported`](crate::errors::NodError::SpeechUnsupported)
    /// when no speech API is available.
    pub fn with_settings(settings: ViewerSettings) -> Result<Self> {
        let events = EventQueue::new();
        let recognizer = create_recognizer(&settings.speech, events.sender())?;
        Ok(Self::new(settings, events, recognizer))
    }

    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.events.sender()
    }

    #[must_use]
    pub fn asset_loader(&self) -> AssetLoader {
        AssetLoader::new(self.events.sender())
    }

    /// Starts loading the model and background named in the settings.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_assets(&self) {
        let loader = self.asset_loader();
        loader.spawn_model(self.settings.assets.model.clone());
        loader.spawn_background(self.settings.assets.background.clone());
    }

    /// Drains and handles every pending event. Returns how many were handled.
    pub fn process_events(&mut self) -> usize {
        let events = self.events.drain();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    pub fn handle_event(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::AssetLoaded(model) => self.on_model_loaded(*model),
            ViewerEvent::AssetLoadFailed(err) => {
                log::error!("Failed to load model: {err}");
            }
            ViewerEvent::BackgroundLoaded(image) => {
                log::info!("Background loaded ({}x{})", image.width, image.height);
                self.scene.background = Background::Image(image);
            }
            ViewerEvent::BackgroundLoadFailed(err) => {
                log::error!("Failed to load background: {err}");
            }
            ViewerEvent::StartClicked => {
                self.controller.on_start_clicked(self.recognizer.as_mut());
            }
            ViewerEvent::StopClicked => {
                self.controller
                    .on_stop_clicked(self.recognizer.as_mut(), &self.director, &mut self.animations);
            }
            ViewerEvent::RecognitionStarted => self.controller.on_recognition_started(),
            ViewerEvent::RecognitionResult { transcript } => self.controller.on_recognition_result(&transcript),
            ViewerEvent::RecognitionEnded => self.controller.on_recognition_ended(),
            ViewerEvent::RecognitionError(err) => self.controller.on_recognition_error(&err),
        }
    }

    fn on_model_loaded(&mut self, model: ModelData) {
        let root = model.instantiate(&mut self.scene, &self.settings.assets.root_name);
        self.model_root = Some(root);

        if self.settings.camera.framing.enabled {
            self.frame_model(root);
        }

        let clip_count = model.clips.len();
        for clip in model.clips {
            let clip = Arc::new(clip);
            let bindings = Binder::bind(&self.scene, root, &clip);
            let mut mixer = AnimationMixer::new();
            let action = mixer.clip_action(Arc::clone(&clip), bindings);
            let mixer = self.animations.add_mixer(mixer);
            self.director
                .register_clip(&clip.name, ActionRef { mixer, action }, &mut self.animations);
        }
        log::info!("Model ready with {clip_count} clips");
    }

    /// Moves the camera to frame the model and pivots the orbit on its center.
    fn frame_model(&mut self, root: NodeHandle) {
        let Some(bounds) = self.scene.bounding_box(root) else {
            log::debug!("Model has no mesh bounds; camera left in place");
            return;
        };

        let framing = &self.settings.camera.framing;
        let center = bounds.center();
        let distance = bounds.size().length() * framing.distance_factor;
        let position = center + Vec3::new(0.0, framing.height_offset, distance * framing.depth_factor);

        if let Some(node) = self.scene.get_node_mut(self.camera_node) {
            node.transform.position = position;
            node.transform.look_at(center, Vec3::Y);
        }
        self.controls.retarget(position, center);
    }

    /// Runs one frame. `wall_dt` is the real time since the previous frame.
    pub fn frame(&mut self, input: &Input, wall_dt: f32, renderer: &mut dyn RenderBackend) {
        self.process_events();

        if let Some((transform, camera)) = self.scene.query_main_camera_bundle() {
            self.controls.update(transform, input, camera.fov.to_degrees(), wall_dt);
        }

        let dt = self.clock.advance(wall_dt);
        self.animations.update(dt, &mut self.scene);

        self.scene.update_world_matrices();
        renderer.render(&self.scene);
    }

    pub fn resize(&mut self, width: u32, height: u32, renderer: &mut dyn RenderBackend) {
        if let Some((_, camera)) = self.scene.query_main_camera_bundle() {
            camera.set_aspect(width, height);
        }
        renderer.resize(width, height);
    }

    #[must_use]
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    #[must_use]
    pub fn director(&self) -> &AnimationDirector {
        &self.director
    }

    #[must_use]
    pub fn controller(&self) -> &RecognitionController {
        &self.controller
    }

    #[must_use]
    pub fn control_state(&self) -> ControlState {
        self.controller.controls()
    }

    #[must_use]
    pub fn orbit_controls(&self) -> &OrbitControls {
        &self.controls
    }

    #[must_use]
    pub fn camera_node(&self) -> NodeHandle {
        self.camera_node
    }

    #[must_use]
    pub fn model_root(&self) -> Option<NodeHandle> {
        self.model_root
    }

    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

fn add_light(scene: &mut Scene, light: &LightSettings) -> NodeHandle {
    match *light {
        LightSettings::Ambient { color, intensity } => {
            scene.add_light(Light::new_ambient(color_from_hex(color), intensity), Vec3::ZERO)
        }
        LightSettings::Point {
            color,
            intensity,
            range,
            position,
        } => scene.add_light(Light::new_point(color_from_hex(color), intensity, range), position),
        LightSettings::Directional {
            color,
            intensity,
            position,
        } => scene.add_light(
            Light::new_directional(color_from_hex(color), intensity),
            position.normalize_or_zero(),
        ),
    }
}
