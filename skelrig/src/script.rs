//! JSON edit scripts
//!
//! A script is an array of tagged operations applied in order to a
//! [`RigEditor`]:
//!
//! ```json
//! [
//!   { "op": "rotate", "bone": 1, "angle": 0.5, "axis": [0, 0, 1] },
//!   { "op": "capture" },
//!   { "op": "ik", "bone": 3, "target": [1.0, 2.5, 0.0] },
//!   { "op": "capture" }
//! ]
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;

use skel_kinematics::{Ray, RigEditor, RigError};

/// Script loading and execution errors
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Step {step} ({op}) failed: {source}")]
    Step {
        step: usize,
        op: &'static str,
        #[source]
        source: RigError,
    },
}

fn x_axis() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}

fn y_axis() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

/// One editing step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Rotate a bone about a world axis (radians)
    Rotate { bone: usize, angle: f32, axis: [f32; 3] },
    /// Twist a bone about its own length (radians)
    Roll { bone: usize, angle: f32 },
    /// Drag a joint in the plane spanned by `right` and `up`, bounded by
    /// the bone's chain
    Translate {
        bone: usize,
        dx: f32,
        dy: f32,
        #[serde(default = "x_axis")]
        right: [f32; 3],
        #[serde(default = "y_axis")]
        up: [f32; 3],
    },
    /// Pull a bone tip towards a world-space target
    Ik { bone: usize, target: [f32; 3] },
    /// Select the bone hit by a ray
    Pick { origin: [f32; 3], direction: [f32; 3] },
    /// Select a bone directly, or clear the selection
    Select { bone: Option<usize> },
    /// Append the live pose as a keyframe
    Capture,
    /// Overwrite a keyframe with the live pose
    Replace { index: usize },
    /// Remove a keyframe
    Delete { index: usize },
    /// Load a keyframe back into the live pose
    Restore { index: usize },
    /// Drop every keyframe
    Clear,
}

impl Operation {
    /// Short name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rotate { .. } => "rotate",
            Self::Roll { .. } => "roll",
            Self::Translate { .. } => "translate",
            Self::Ik { .. } => "ik",
            Self::Pick { .. } => "pick",
            Self::Select { .. } => "select",
            Self::Capture => "capture",
            Self::Replace { .. } => "replace",
            Self::Delete { .. } => "delete",
            Self::Restore { .. } => "restore",
            Self::Clear => "clear",
        }
    }

    /// Apply this step; returns a one-line description of what happened
    pub fn apply(&self, editor: &mut RigEditor) -> Result<String, RigError> {
        match *self {
            Self::Rotate { bone, angle, axis } => {
                editor.rotate_on_axis(bone, angle, Vec3::from_array(axis))?;
                Ok(format!("rotated bone {bone} by {angle:.3} rad"))
            }
            Self::Roll { bone, angle } => {
                editor.roll(bone, angle)?;
                Ok(format!("rolled bone {bone} by {angle:.3} rad"))
            }
            Self::Translate {
                bone,
                dx,
                dy,
                right,
                up,
            } => {
                let moved = editor.drag_bone(
                    bone,
                    dx,
                    dy,
                    Vec3::from_array(right),
                    Vec3::from_array(up),
                )?;
                Ok(if moved {
                    format!("moved bone {bone}")
                } else {
                    format!("bone {bone} out of reach, not moved")
                })
            }
            Self::Ik { bone, target } => {
                let outcome = editor.ik_drag(bone, Vec3::from_array(target))?;
                Ok(format!(
                    "ik on bone {bone}: tip {:.3} from target",
                    outcome.distance
                ))
            }
            Self::Pick { origin, direction } => {
                let ray = Ray::new(Vec3::from_array(origin), Vec3::from_array(direction));
                Ok(match editor.pick(&ray) {
                    Some(bone) => format!("picked bone {bone}"),
                    None => "pick missed".to_string(),
                })
            }
            Self::Select { bone } => {
                editor.set_highlighted(bone)?;
                Ok(format!("selected {bone:?}"))
            }
            Self::Capture => {
                let index = editor.capture()?;
                Ok(format!("captured keyframe {index}"))
            }
            Self::Replace { index } => {
                editor.replace(index)?;
                Ok(format!("replaced keyframe {index}"))
            }
            Self::Delete { index } => {
                editor.delete(index)?;
                Ok(format!("deleted keyframe {index}"))
            }
            Self::Restore { index } => {
                editor.restore(index)?;
                Ok(format!("restored keyframe {index}"))
            }
            Self::Clear => {
                editor.clear_keyframes()?;
                Ok("cleared keyframes".to_string())
            }
        }
    }
}

/// Ordered list of operations
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub operations: Vec<Operation>,
}

impl Script {
    /// Parse a script from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a script from a JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScriptError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Run every step in order, stopping at the first failure
    pub fn run(&self, editor: &mut RigEditor) -> Result<Vec<String>, ScriptError> {
        let mut log = Vec::with_capacity(self.operations.len());
        for (step, operation) in self.operations.iter().enumerate() {
            let message = operation.apply(editor).map_err(|source| ScriptError::Step {
                step,
                op: operation.name(),
                source,
            })?;
            log::info!("step {step}: {message}");
            log.push(message);
        }
        Ok(log)
    }
}
