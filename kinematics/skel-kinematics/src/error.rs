use thiserror::Error;

/// Error types for rig construction, editing and playback
#[derive(Error, Debug)]
pub enum RigError {
    /// Unreadable or malformed JSON rig description
    #[cfg(feature = "serde-support")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rig must contain at least one bone
    #[error("Rig contains no bones")]
    EmptyRig,

    /// Bone index does not address a bone of this rig
    #[error("Bone index {index} out of range (rig has {count} bones)")]
    BoneOutOfRange { index: usize, count: usize },

    /// Parent index refers to a bone that does not exist (or to the bone itself)
    #[error("Bone {bone} has invalid parent index {parent}")]
    DanglingParent { bone: usize, parent: usize },

    /// Following parent links from a bone revisits a bone
    #[error("Bone hierarchy contains a cycle through bone {bone}")]
    CyclicHierarchy { bone: usize },

    /// Ancestor chain longer than the configured structural limit
    #[error("Bone {bone} is nested deeper than the limit of {max_depth}")]
    HierarchyTooDeep { bone: usize, max_depth: usize },

    /// Explicit child list disagrees with the parent links
    #[error("Child list of bone {bone} does not match parent links")]
    InconsistentChildren { bone: usize },

    /// IK chain is empty or not a parent-linked path
    #[error("Invalid IK chain: {0}")]
    InvalidChain(String),

    /// Keyframe index does not address a captured keyframe
    #[error("Keyframe index {index} out of range (track has {count} keyframes)")]
    KeyframeOutOfRange { index: usize, count: usize },

    /// Playback time outside `[0, last keyframe index]`
    #[error("Playback time {time} outside the track range [0, {max}]")]
    TimeOutOfRange { time: f32, max: f32 },

    /// No keyframes have been captured yet
    #[error("Keyframe track is empty")]
    EmptyTrack,

    /// Playback needs a start and an end keyframe
    #[error("Playback needs at least 2 keyframes, track has {count}")]
    NotEnoughKeyframes { count: usize },

    /// Keyframe list mutation attempted while playing back
    #[error("Keyframes cannot be edited while playback is active")]
    PlaybackActive,

    /// Keyframe was captured from a rig with a different bone count
    #[error("Keyframe holds {found} bones but the rig has {expected}")]
    BoneCountMismatch { expected: usize, found: usize },
}

/// Result type using RigError
pub type Result<T> = std::result::Result<T, RigError>;
