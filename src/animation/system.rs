use slotmap::SlotMap;

use crate::animation::action::AnimationAction;
use crate::animation::mixer::AnimationMixer;
use crate::animation::{ActionHandle, MixerHandle};
use crate::scene::Scene;

/// Non-owning reference to an action living inside a mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionRef {
    pub mixer: MixerHandle,
    pub action: ActionHandle,
}

/// Animation system.
///
/// Owns every `AnimationMixer` and drives them once per frame.
#[derive(Debug, Default)]
pub struct AnimationSystem {
    mixers: SlotMap<MixerHandle, AnimationMixer>,
}

impl AnimationSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mixer(&mut self, mixer: AnimationMixer) -> MixerHandle {
        self.mixers.insert(mixer)
    }

    #[must_use]
    pub fn mixer(&self, handle: MixerHandle) -> Option<&AnimationMixer> {
        self.mixers.get(handle)
    }

    pub fn mixer_mut(&mut self, handle: MixerHandle) -> Option<&mut AnimationMixer> {
        self.mixers.get_mut(handle)
    }

    #[must_use]
    pub fn mixer_count(&self) -> usize {
        self.mixers.len()
    }

    #[must_use]
    pub fn action(&self, reference: ActionRef) -> Option<&AnimationAction> {
        self.mixers.get(reference.mixer)?.action(reference.action)
    }

    pub fn action_mut(&mut self, reference: ActionRef) -> Option<&mut AnimationAction> {
        self.mixers.get_mut(reference.mixer)?.action_mut(reference.action)
    }

    /// Advances every mixer by `dt` seconds and applies the poses to `scene`.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        for (_, mixer) in &mut self.mixers {
            mixer.update(dt, scene);
        }
    }
}
