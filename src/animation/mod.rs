//! Keyframe animation runtime: tracks, clips, actions, mixers.

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod mixer;
pub mod system;
pub mod tracks;
pub mod values;

slotmap::new_key_type! {
    /// Handle to an action inside an [`AnimationMixer`].
    pub struct ActionHandle;
    /// Handle to a mixer inside the [`AnimationSystem`].
    pub struct MixerHandle;
}

pub use action::{AnimationAction, LoopMode, TrackValue};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use mixer::AnimationMixer;
pub use system::{ActionRef, AnimationSystem};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::{Interpolatable, MorphWeightData, MAX_MORPH_TARGETS};
