//! Viewer configuration.
//!
//! Every field has a default matching the stock demo, so an empty JSON
//! object (or no file at all) yields a working viewer.
//!
//! ```json
//! {
//!   "assets": { "model": "assets/nice.glb" },
//!   "animation": { "frame_step": "real_time" },
//!   "speech": { "lang": "en-US" }
//! }
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::director::{ClipPolicy, DEFAULT_TRIGGER_TIME_SCALE};
use crate::errors::Result;
use crate::speech::RecognitionSettings;
use crate::utils::time::FrameStep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub window: WindowSettings,
    pub assets: AssetSettings,
    pub camera: CameraSettings,
    pub lights: Vec<LightSettings>,
    pub orbit: OrbitSettings,
    pub speech: RecognitionSettings,
    pub animation: AnimationSettings,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            assets: AssetSettings::default(),
            camera: CameraSettings::default(),
            lights: LightSettings::default_rig(),
            orbit: OrbitSettings::default(),
            speech: RecognitionSettings::default(),
            animation: AnimationSettings::default(),
        }
    }
}

impl ViewerSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json_str(&text)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// DOM ids of the recognition buttons (web only).
    pub start_button_id: String,
    pub stop_button_id: String,
    /// DOM id of the element that receives orbit mouse input (web only).
    /// Falls back to the page body when absent.
    pub canvas_id: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Nod Viewer".to_string(),
            width: 1280,
            height: 720,
            start_button_id: "startButton".to_string(),
            stop_button_id: "stopButton".to_string(),
            canvas_id: "viewport".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    pub model: PathBuf,
    pub background: PathBuf,
    /// Name of the scene node the model is placed under.
    pub root_name: String,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            model: PathBuf::from("nice.glb"),
            background: PathBuf::from("back.jpg"),
            root_name: "model_root".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub framing: FramingSettings,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 30.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 4.0, 10.0),
            target: Vec3::new(0.0, 1.6, 0.0),
            framing: FramingSettings::default(),
        }
    }
}

/// How the camera is placed once the model's bounds are known.
///
/// With `d = |size| * distance_factor`, the camera goes to
/// `center + (0, height_offset, d * depth_factor)` and looks at `center`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingSettings {
    pub enabled: bool,
    pub distance_factor: f32,
    pub height_offset: f32,
    pub depth_factor: f32,
}

impl Default for FramingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            distance_factor: 1.2,
            height_offset: 1.5,
            depth_factor: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LightSettings {
    Ambient {
        color: u32,
        intensity: f32,
    },
    Point {
        color: u32,
        intensity: f32,
        range: f32,
        position: Vec3,
    },
    /// `position` is normalized; only its direction matters.
    Directional {
        color: u32,
        intensity: f32,
        position: Vec3,
    },
}

impl LightSettings {
    #[must_use]
    pub fn default_rig() -> Vec<LightSettings> {
        vec![
            LightSettings::Ambient {
                color: 0x0040_4040,
                intensity: 2.0,
            },
            LightSettings::Point {
                color: 0x00ff_ffff,
                intensity: 3.0,
                range: 100.0,
                position: Vec3::new(15.0, 30.0, 20.0),
            },
            LightSettings::Directional {
                color: 0x00ff_ffff,
                intensity: 1.5,
                position: Vec3::new(10.0, 20.0, 15.0),
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.2,
            pan_speed: 1.0,
            enable_damping: false,
            damping_factor: 0.05,
            min_distance: 0.01,
            max_distance: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub frame_step: FrameStep,
    pub trigger_time_scale: f32,
    pub policies: Vec<ClipPolicy>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            frame_step: FrameStep::default(),
            trigger_time_scale: DEFAULT_TRIGGER_TIME_SCALE,
            policies: ClipPolicy::default_table(),
        }
    }
}
