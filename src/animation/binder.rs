use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, Scene};

pub struct Binder;

impl Binder {
    /// Resolves every track of `clip` to a node in the subtree under `root`.
    ///
    /// Tracks whose node name does not occur in the subtree are skipped.
    #[must_use]
    pub fn bind(scene: &Scene, root: NodeHandle, clip: &AnimationClip) -> Vec<PropertyBinding> {
        let bindings: Vec<PropertyBinding> = clip
            .tracks
            .iter()
            .enumerate()
            .filter_map(|(track_index, track)| {
                scene
                    .find_node_by_name(root, &track.meta.node_name)
                    .map(|node| PropertyBinding {
                        track_index,
                        node,
                        target: track.meta.target,
                    })
            })
            .collect();

        if bindings.len() < clip.tracks.len() {
            log::debug!(
                "Clip '{}': bound {} of {} tracks",
                clip.name,
                bindings.len(),
                clip.tracks.len()
            );
        }
        bindings
    }
}
