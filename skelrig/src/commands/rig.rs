//! Rig inspection command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use glam::Vec3;
use std::path::{Path, PathBuf};

use skel_kinematics::{KinematicsConfig, Ray, Skeleton, pick};

use crate::utils::{
    NodeType, TreeNode, TreeOptions, format_indices, format_vec3, load_rig, parse_vec3,
    render_tree,
};

#[derive(Subcommand)]
pub enum RigCommands {
    /// Display information about a rig
    Info {
        /// Path to the rig JSON file
        file: PathBuf,
    },

    /// Validate a rig's hierarchy
    Validate {
        /// Path to the rig JSON file
        file: PathBuf,

        /// Maximum accepted ancestor depth
        #[arg(long, default_value_t = 256)]
        max_depth: usize,
    },

    /// Show the bone hierarchy as a tree
    Tree {
        /// Path to the rig JSON file
        file: PathBuf,

        /// Maximum depth to display
        #[arg(long)]
        depth: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Show compact metadata inline
        #[arg(long)]
        compact: bool,
    },

    /// Find the bone hit by a ray
    Pick {
        /// Path to the rig JSON file
        file: PathBuf,

        /// Ray origin as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        origin: Vec3,

        /// Ray direction as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        direction: Vec3,

        /// Picking cylinder radius
        #[arg(long, default_value_t = 0.1)]
        radius: f32,
    },
}

pub fn execute(command: RigCommands) -> Result<()> {
    match command {
        RigCommands::Info { file } => execute_info(file),
        RigCommands::Validate { file, max_depth } => execute_validate(file, max_depth),
        RigCommands::Tree {
            file,
            depth,
            no_color,
            compact,
        } => execute_tree(file, depth, no_color, compact),
        RigCommands::Pick {
            file,
            origin,
            direction,
            radius,
        } => execute_pick(file, origin, direction, radius),
    }
}

fn open_skeleton(path: &Path, config: &KinematicsConfig) -> Result<Skeleton> {
    let description = load_rig(path)?;
    Skeleton::from_description(&description, config)
        .with_context(|| format!("Invalid rig: {}", path.display()))
}

fn execute_validate(path: PathBuf, max_depth: usize) -> Result<()> {
    use console::style;

    let config = KinematicsConfig::default().with_max_depth(max_depth);
    let skeleton = open_skeleton(&path, &config)?;

    println!(
        "✓ Rig '{}' is valid ({} bones, depth {})",
        style(path.display()).cyan(),
        style(skeleton.len()).green(),
        style(skeleton.depth()).yellow()
    );
    Ok(())
}

fn execute_info(path: PathBuf) -> Result<()> {
    use crate::utils::table::{add_table_row, create_table};
    use console::style;

    let skeleton = open_skeleton(&path, &KinematicsConfig::default())?;

    println!("\n{}", style("Rig Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Bones: {}", style(skeleton.len()).green());
    println!("Roots: {}", style(format_indices(skeleton.roots())).yellow());
    println!("Depth: {}", style(skeleton.depth()).yellow());

    let branches = skeleton
        .bones()
        .iter()
        .filter(|bone| bone.children().len() > 1)
        .count();
    let total_length: f32 = skeleton.bones().iter().map(|bone| bone.length()).sum();
    println!("Branch points: {}", style(branches).green());
    println!("Total length: {}", style(format!("{total_length:.3}")).green());

    println!("\n{}", style("Bones").bold());
    let mut table = create_table(&[
        "Index", "Parent", "Children", "Length", "Joint", "Tip", "Anchor",
    ]);
    for bone in skeleton.bones() {
        let anchor = skeleton.anchor_of(bone.index())?;
        add_table_row(
            &mut table,
            [
                bone.index().to_string(),
                bone.parent().map_or_else(|| "-".to_string(), |p| p.to_string()),
                format_indices(bone.children()),
                format!("{:.3}", bone.length()),
                format_vec3(bone.position()),
                format_vec3(bone.endpoint()),
                anchor.to_string(),
            ],
        );
    }
    table.printstd();

    Ok(())
}

fn bone_node(skeleton: &Skeleton, index: usize) -> TreeNode {
    let bone = &skeleton.bones()[index];
    let node_type = if bone.is_root() {
        NodeType::Root
    } else {
        match bone.children().len() {
            0 => NodeType::Leaf,
            1 => NodeType::Bone,
            _ => NodeType::Branch,
        }
    };

    let mut node = TreeNode::new(format!("bone {index}"), node_type)
        .with_metadata("length", format!("{:.3}", bone.length()))
        .with_metadata("joint", format_vec3(bone.position()));
    if bone.local_offset() != Vec3::ZERO {
        node = node.with_metadata("offset", format_vec3(bone.local_offset()));
    }

    bone.children()
        .iter()
        .fold(node, |node, &child| node.add_child(bone_node(skeleton, child)))
}

fn execute_tree(path: PathBuf, depth: Option<usize>, no_color: bool, compact: bool) -> Result<()> {
    let skeleton = open_skeleton(&path, &KinematicsConfig::default())?;

    let name = path
        .file_name()
        .map_or_else(|| "rig".to_string(), |n| n.to_string_lossy().into_owned());
    let root = skeleton
        .roots()
        .iter()
        .fold(
            TreeNode::new(name, NodeType::Rig)
                .with_metadata("bones", skeleton.len().to_string()),
            |node, &root| node.add_child(bone_node(&skeleton, root)),
        );

    let options = TreeOptions {
        max_depth: depth,
        no_color,
        compact,
    };
    print!("{}", render_tree(&root, &options));
    Ok(())
}

fn execute_pick(path: PathBuf, origin: Vec3, direction: Vec3, radius: f32) -> Result<()> {
    use console::style;

    let config = KinematicsConfig::default().with_pick_radius(radius);
    let skeleton = open_skeleton(&path, &config)?;

    match pick(&skeleton, &Ray::new(origin, direction), &config) {
        Some(hit) => println!(
            "bone {} at distance {}",
            style(hit.bone).green(),
            style(format!("{:.3}", hit.distance)).yellow()
        ),
        None => println!("none"),
    }
    Ok(())
}
