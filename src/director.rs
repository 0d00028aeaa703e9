//! Animation Director
//!
//! Classifies a model's animation clips by name and exposes the single
//! externally-triggered operation of the viewer: the nod.
//!
//! # Policy table
//!
//! | clip name              | role           | loop   | autoplay | time scale | clamp |
//! |------------------------|----------------|--------|----------|------------|-------|
//! | `[保留アクション].001` | PrimaryTrigger | Once   | no       | 1.0        | yes   |
//! | `[保留アクション]`     | AmbientLoop    | Repeat | yes      | 1.0        | no    |
//! | `see2`                 | SecondaryLoop  | Repeat | yes      | 0.3        | no    |
//!
//! Names are matched exactly. Any other clip is left untouched. When two
//! clips map to the same role, the last one registered wins.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut director = AnimationDirector::new();
//! director.register_clip("see2", action_ref, &mut animations);
//! director.trigger_primary(&mut animations); // no-op: nothing holds the primary role
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::{ActionRef, AnimationSystem, LoopMode};

/// Clip that plays once, on demand, when recognition stops.
pub const PRIMARY_CLIP: &str = "[保留アクション].001";
/// Clip that loops from load onwards at normal speed.
pub const AMBIENT_CLIP: &str = "[保留アクション]";
/// Clip that loops from load onwards at reduced speed.
pub const SECONDARY_CLIP: &str = "see2";

/// Playback speed applied by [`AnimationDirector::trigger_primary`].
pub const DEFAULT_TRIGGER_TIME_SCALE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    PrimaryTrigger,
    AmbientLoop,
    SecondaryLoop,
}

/// Playback settings applied to a clip when it is registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipPolicy {
    pub clip_name: String,
    pub role: Role,
    pub loop_mode: LoopMode,
    pub autoplay: bool,
    pub time_scale: f32,
    pub clamp_when_finished: bool,
}

impl ClipPolicy {
    /// The fixed table the viewer ships with.
    #[must_use]
    pub fn default_table() -> Vec<ClipPolicy> {
        vec![
            ClipPolicy {
                clip_name: PRIMARY_CLIP.to_string(),
                role: Role::PrimaryTrigger,
                loop_mode: LoopMode::Once,
                autoplay: false,
                time_scale: 1.0,
                clamp_when_finished: true,
            },
            ClipPolicy {
                clip_name: AMBIENT_CLIP.to_string(),
                role: Role::AmbientLoop,
                loop_mode: LoopMode::Repeat,
                autoplay: true,
                time_scale: 1.0,
                clamp_when_finished: false,
            },
            ClipPolicy {
                clip_name: SECONDARY_CLIP.to_string(),
                role: Role::SecondaryLoop,
                loop_mode: LoopMode::Repeat,
                autoplay: true,
                time_scale: 0.3,
                clamp_when_finished: false,
            },
        ]
    }
}

/// Observable state of the primary trigger action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Playing,
}

/// Owns role → action references and the nod trigger.
///
/// Actions themselves live in mixers inside an [`AnimationSystem`]; the
/// director only keeps [`ActionRef`]s and borrows the system when it needs
/// to touch playback state.
#[derive(Debug, Clone)]
pub struct AnimationDirector {
    policies: Vec<ClipPolicy>,
    trigger_time_scale: f32,

    primary: Option<ActionRef>,
    ambient: Option<ActionRef>,
    secondary: Option<ActionRef>,
}

impl Default for AnimationDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDirector {
    #[must_use]
    pub fn new() -> Self {
        Self::with_policies(ClipPolicy::default_table(), DEFAULT_TRIGGER_TIME_SCALE)
    }

    #[must_use]
    pub fn with_policies(policies: Vec<ClipPolicy>, trigger_time_scale: f32) -> Self {
        Self {
            policies,
            trigger_time_scale,
            primary: None,
            ambient: None,
            secondary: None,
        }
    }

    #[must_use]
    pub fn policies(&self) -> &[ClipPolicy] {
        &self.policies
    }

    /// Looks up the policy for an exact clip name.
    #[must_use]
    pub fn policy_for(&self, clip_name: &str) -> Option<&ClipPolicy> {
        self.policies.iter().find(|p| p.clip_name == clip_name)
    }

    #[must_use]
    pub fn role_of(&self, clip_name: &str) -> Option<Role> {
        self.policy_for(clip_name).map(|p| p.role)
    }

    #[must_use]
    pub fn action_for(&self, role: Role) -> Option<ActionRef> {
        match role {
            Role::PrimaryTrigger => self.primary,
            Role::AmbientLoop => self.ambient,
            Role::SecondaryLoop => self.secondary,
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<ActionRef> {
        match role {
            Role::PrimaryTrigger => &mut self.primary,
            Role::AmbientLoop => &mut self.ambient,
            Role::SecondaryLoop => &mut self.secondary,
        }
    }

    /// Classifies a clip and applies its playback policy.
    ///
    /// Unknown names are ignored. A second clip for an occupied role replaces
    /// the previous holder (the replaced action keeps whatever it was doing).
    pub fn register_clip(&mut self, name: &str, action: ActionRef, animations: &mut AnimationSystem) {
        let Some(policy) = self.policy_for(name).cloned() else {
            log::debug!("Clip '{name}' has no role; left idle");
            return;
        };

        let Some(target) = animations.action_mut(action) else {
            log::warn!("Clip '{name}' registered with a stale action reference");
            return;
        };

        target.loop_mode = policy.loop_mode;
        target.clamp_when_finished = policy.clamp_when_finished;
        target.time_scale = policy.time_scale;
        if policy.autoplay {
            target.play();
        }

        if let Some(previous) = self.slot_mut(policy.role).replace(action)
            && previous != action
        {
            log::warn!("Clip '{name}' replaces an earlier clip in role {:?}", policy.role);
        }
        log::debug!("Clip '{name}' assigned to {:?}", policy.role);
    }

    /// Restarts the primary clip from time zero at the trigger speed.
    ///
    /// Returns whether an action was triggered. Without a registered primary
    /// clip this does nothing.
    pub fn trigger_primary(&self, animations: &mut AnimationSystem) -> bool {
        let Some(action) = self.primary.and_then(|r| animations.action_mut(r)) else {
            return false;
        };

        action.reset();
        action.time_scale = self.trigger_time_scale;
        action.play();
        log::info!("Animation triggered: '{}'", action.clip_name());
        true
    }

    #[must_use]
    pub fn primary_state(&self, animations: &AnimationSystem) -> TriggerState {
        match self.primary.and_then(|r| animations.action(r)) {
            Some(action) if action.is_running() => TriggerState::Playing,
            _ => TriggerState::Idle,
        }
    }
}
