use std::sync::Arc;

use crate::animation::{
    binding::PropertyBinding,
    clip::{AnimationClip, TrackData},
    tracks::KeyframeCursor,
    values::MorphWeightData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Play to the end once, then stop (or hold, see `clamp_when_finished`).
    Once,
    /// Wrap around forever.
    Repeat,
    /// Bounce between start and end forever.
    PingPong,
}

/// A playable instance of a clip with its own playback parameters.
///
/// Playback state follows a small set of flags:
/// - `playing`: the action has been scheduled with [`play`](Self::play)
/// - `enabled`: cleared when a `Once` action finishes without clamping
/// - `paused`: set when a `Once` action finishes with clamping, holding the last pose
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub clamp_when_finished: bool,
    pub paused: bool,
    pub enabled: bool,

    playing: bool,

    pub bindings: Vec<PropertyBinding>,

    pub(crate) track_cursors: Vec<KeyframeCursor>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Repeat,
            clamp_when_finished: false,
            paused: false,
            enabled: true,
            playing: false,
            bindings: Vec::new(),
            track_cursors: vec![KeyframeCursor::default(); track_count],
        }
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: Vec<PropertyBinding>) -> Self {
        self.bindings = bindings;
        self
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn clip_name(&self) -> &str {
        &self.clip.name
    }

    /// Schedules the action. Does not rewind; see [`reset`](Self::reset).
    pub fn play(&mut self) -> &mut Self {
        self.playing = true;
        self
    }

    /// Unschedules the action and rewinds it.
    pub fn stop(&mut self) -> &mut Self {
        self.playing = false;
        self.reset()
    }

    /// Rewinds to time zero and clears the finished state.
    pub fn reset(&mut self) -> &mut Self {
        self.time = 0.0;
        self.paused = false;
        self.enabled = true;
        self.track_cursors.fill(KeyframeCursor::default());
        self
    }

    /// Whether the action is scheduled, regardless of pause state.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.playing
    }

    /// Whether time currently advances for this action.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.playing && self.enabled && !self.paused && self.time_scale != 0.0
    }

    /// Whether the action contributes a pose this frame.
    ///
    /// A clamped `Once` action keeps contributing its last pose while paused.
    #[must_use]
    pub fn is_effective(&self) -> bool {
        self.playing && self.enabled && self.weight > 0.0
    }

    /// Advances time by `dt * time_scale` and applies the loop mode.
    pub fn update(&mut self, dt: f32) {
        if !self.is_running() {
            return;
        }

        let duration = self.clip.duration.max(0.0);
        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                let finished = if self.time >= duration {
                    self.time = duration;
                    true
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    true
                } else {
                    false
                };

                if finished {
                    if self.clamp_when_finished {
                        self.paused = true;
                    } else {
                        self.enabled = false;
                    }
                    log::trace!("Action '{}' finished", self.clip.name);
                }
            }
            LoopMode::Repeat | LoopMode::PingPong if duration <= 0.0 => {
                self.time = 0.0;
            }
            LoopMode::Repeat => {
                self.time = self.time.rem_euclid(duration);
            }
            LoopMode::PingPong => {
                let cycle = duration * 2.0;
                let t = self.time.rem_euclid(cycle);
                self.time = if t > duration { cycle - t } else { t };
            }
        }
    }

    /// Samples the track at `track_index` at the current time.
    pub fn sample_track(&mut self, track_index: usize) -> Option<TrackValue> {
        let track = self.clip.tracks.get(track_index)?;
        let cursor = self.track_cursors.get_mut(track_index)?;
        let time = self.time;

        Some(match &track.data {
            TrackData::Vector3(t) => TrackValue::Vector3(t.sample_with_cursor(time, cursor)?),
            TrackData::Quaternion(t) => TrackValue::Quaternion(t.sample_with_cursor(time, cursor)?),
            TrackData::Scalar(t) => TrackValue::Scalar(t.sample_with_cursor(time, cursor)?),
            TrackData::MorphWeights(t) => TrackValue::MorphWeights(t.sample_with_cursor(time, cursor)?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(glam::Vec3),
    Quaternion(glam::Quat),
    Scalar(f32),
    MorphWeights(MorphWeightData),
}
