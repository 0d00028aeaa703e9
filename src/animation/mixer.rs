use std::sync::Arc;

use slotmap::SlotMap;

use crate::animation::action::{AnimationAction, TrackValue};
use crate::animation::binding::{PropertyBinding, TargetPath};
use crate::animation::clip::AnimationClip;
use crate::animation::ActionHandle;
use crate::scene::Scene;

/// Advances a set of actions and writes their poses into a scene.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: SlotMap<ActionHandle, AnimationAction>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&mut self, action: AnimationAction) -> ActionHandle {
        self.actions.insert(action)
    }

    /// Creates an action for `clip` bound through `bindings`.
    ///
    /// The action starts idle: nothing plays until [`AnimationAction::play`].
    pub fn clip_action(&mut self, clip: Arc<AnimationClip>, bindings: Vec<PropertyBinding>) -> ActionHandle {
        self.add_action(AnimationAction::new(clip).with_bindings(bindings))
    }

    #[must_use]
    pub fn action(&self, handle: ActionHandle) -> Option<&AnimationAction> {
        self.actions.get(handle)
    }

    pub fn action_mut(&mut self, handle: ActionHandle) -> Option<&mut AnimationAction> {
        self.actions.get_mut(handle)
    }

    /// Finds the first action whose clip carries `name`.
    #[must_use]
    pub fn find_action(&self, name: &str) -> Option<ActionHandle> {
        self.actions
            .iter()
            .find(|(_, action)| action.clip_name() == name)
            .map(|(handle, _)| handle)
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionHandle, &AnimationAction)> {
        self.actions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        for (_, action) in &mut self.actions {
            action.update(dt);

            if !action.is_effective() {
                continue;
            }

            for i in 0..action.bindings.len() {
                let binding = action.bindings[i];
                if let Some(value) = action.sample_track(binding.track_index) {
                    apply_value(scene, &binding, value);
                }
            }
        }
    }
}

fn apply_value(scene: &mut Scene, binding: &PropertyBinding, value: TrackValue) {
    let Some(node) = scene.get_node_mut(binding.node) else {
        return;
    };

    match (binding.target, value) {
        (TargetPath::Translation, TrackValue::Vector3(v)) => node.transform.position = v,
        (TargetPath::Scale, TrackValue::Vector3(v)) => node.transform.scale = v,
        (TargetPath::Rotation, TrackValue::Quaternion(q)) => node.transform.rotation = q,
        (TargetPath::Weights, TrackValue::MorphWeights(w)) => {
            let count = node.morph_weights.len().min(w.weights.len());
            node.morph_weights[..count].copy_from_slice(&w.weights[..count]);
        }
        (target, _) => {
            log::trace!("Track value does not match target {target:?}; skipped");
        }
    }
}
