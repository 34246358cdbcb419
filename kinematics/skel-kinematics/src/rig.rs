//! Rest-pose rig description handed over by an asset loader
//!
//! The description is plain data: world-space joint and tip positions per
//! bone plus parent links. [`crate::Skeleton::from_description`] validates it
//! and derives the rest frames used by the kinematics operations.

/// One bone of a rest-pose rig
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct BoneDescription {
    /// Parent bone index (`None` for roots)
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub parent: Option<usize>,
    /// Joint position in world space
    pub position: [f32; 3],
    /// Distal tip in world space
    pub endpoint: [f32; 3],
    /// Rest orientation as `[x, y, z, w]`; informational only
    #[cfg_attr(feature = "serde-support", serde(default = "identity_rotation"))]
    pub rotation: [f32; 4],
    /// Optional explicit child list, checked against the parent links
    #[cfg_attr(
        feature = "serde-support",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub children: Option<Vec<usize>>,
}

#[cfg(feature = "serde-support")]
fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

impl BoneDescription {
    /// Create a bone from its parent link and rest joint/tip positions
    pub fn new(parent: Option<usize>, position: [f32; 3], endpoint: [f32; 3]) -> Self {
        Self {
            parent,
            position,
            endpoint,
            rotation: [0.0, 0.0, 0.0, 1.0],
            children: None,
        }
    }

    /// Attach an explicit child list
    pub fn with_children(mut self, children: Vec<usize>) -> Self {
        self.children = Some(children);
        self
    }
}

/// A complete rest-pose rig
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct RigDescription {
    /// Bones in index order
    pub bones: Vec<BoneDescription>,
}

impl RigDescription {
    /// Create a rig from a bone list
    pub fn new(bones: Vec<BoneDescription>) -> Self {
        Self { bones }
    }

    /// Number of bones
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// A straight chain of `count` bones of length `segment` along +Y,
    /// joints touching tips. Handy for tests and demos.
    pub fn straight_chain(count: usize, segment: f32) -> Self {
        let bones = (0..count)
            .map(|i| {
                let base = i as f32 * segment;
                BoneDescription::new(
                    i.checked_sub(1),
                    [0.0, base, 0.0],
                    [0.0, base + segment, 0.0],
                )
            })
            .collect();
        Self { bones }
    }
}

#[cfg(feature = "serde-support")]
impl RigDescription {
    /// Parse a rig from JSON text
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a rig from a JSON reader; read failures surface as
    /// [`RigError::Json`](crate::RigError::Json)
    pub fn from_reader<R: std::io::Read>(reader: R) -> crate::Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serialize the rig to pretty-printed JSON
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
