//! Loading rigs and edit scripts from disk

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use skel_kinematics::RigDescription;

use crate::script::Script;

/// Read a JSON rig description
pub fn load_rig(path: &Path) -> Result<RigDescription> {
    let file =
        File::open(path).with_context(|| format!("Failed to open rig: {}", path.display()))?;
    RigDescription::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse rig: {}", path.display()))
}

/// Read a JSON edit script
pub fn load_script(path: &Path) -> Result<Script> {
    let file =
        File::open(path).with_context(|| format!("Failed to open script: {}", path.display()))?;
    Script::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse script: {}", path.display()))
}
