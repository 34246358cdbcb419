//! Posing and playback command implementations

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use skel_kinematics::{Easing, KinematicsConfig, RenderData, RigEditor};

use crate::utils::{
    add_table_row, create_progress_bar, create_table, format_rotation, format_vec3, load_rig,
    load_script,
};

/// Output format for a posed rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Per-bone table
    Table,
    /// Render export as JSON
    Json,
}

#[derive(Subcommand)]
pub enum AnimCommands {
    /// Apply an edit script and print the resulting pose
    Pose {
        /// Path to the rig JSON file
        file: PathBuf,

        /// Path to the edit script
        #[arg(short, long)]
        script: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Run an edit script, then play back its keyframes
    Animate {
        /// Path to the rig JSON file
        file: PathBuf,

        /// Path to the edit script (must capture at least two keyframes)
        #[arg(short, long)]
        script: PathBuf,

        /// Samples per keyframe interval
        #[arg(long, default_value_t = 4.0)]
        fps: f32,

        /// Easing between keyframes (linear, smooth_step, ease_in_quad, smoother_step)
        #[arg(long, default_value_t = Easing::Linear)]
        easing: Easing,

        /// Write frames to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn execute(command: AnimCommands) -> Result<()> {
    match command {
        AnimCommands::Pose {
            file,
            script,
            format,
        } => execute_pose(file, script, format),
        AnimCommands::Animate {
            file,
            script,
            fps,
            easing,
            output,
        } => execute_animate(file, script, fps, easing, output),
    }
}

/// Load the rig, run the script and hand back the editor
fn scripted_editor(rig: &Path, script: &Path, config: KinematicsConfig) -> Result<RigEditor> {
    let description = load_rig(rig)?;
    let mut editor = RigEditor::new(&description, config)
        .with_context(|| format!("Invalid rig: {}", rig.display()))?;

    let script = load_script(script)?;
    script
        .run(&mut editor)
        .context("Failed to apply edit script")?;
    Ok(editor)
}

fn execute_pose(rig: PathBuf, script: PathBuf, format: OutputFormat) -> Result<()> {
    use console::style;

    let mut editor = scripted_editor(&rig, &script, KinematicsConfig::default())?;

    match format {
        OutputFormat::Json => {
            let data = editor.render_data()?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        OutputFormat::Table => {
            println!("\n{}", style("Pose").bold().underlined());
            println!("Status: {}", style(editor.status_line()).yellow());
            match editor.highlighted() {
                Some(bone) => println!("Selected: {}", style(bone).green()),
                None => println!("Selected: {}", style("none").dim()),
            }

            let skeleton = editor.skeleton();
            let mut table = create_table(&["Index", "Joint", "Tip", "Local", "World"]);
            for bone in skeleton.bones() {
                let world = skeleton.world_rotation(bone.index())?;
                add_table_row(
                    &mut table,
                    [
                        bone.index().to_string(),
                        format_vec3(bone.position()),
                        format_vec3(bone.endpoint()),
                        format_rotation(bone.local_rotation()),
                        format_rotation(world),
                    ],
                );
            }
            table.printstd();
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct Frame {
    time: f32,
    #[serde(flatten)]
    data: RenderData,
}

#[derive(Serialize)]
struct Playback {
    easing: Easing,
    fps: f32,
    keyframes: usize,
    frames: Vec<Frame>,
}

fn execute_animate(
    rig: PathBuf,
    script: PathBuf,
    fps: f32,
    easing: Easing,
    output: Option<PathBuf>,
) -> Result<()> {
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("fps must be a positive number, got {fps}");
    }

    let config = KinematicsConfig::default().with_easing(easing);
    let mut editor = scripted_editor(&rig, &script, config)?;
    let keyframes = editor.track().len();
    editor
        .start_playback()
        .context("Cannot start playback")?;

    let max_time = (keyframes - 1) as f32;
    if max_time + 1.0 / fps <= max_time {
        anyhow::bail!("fps {fps} is too fine to step across {keyframes} keyframes");
    }

    // Sample times come from the tick index so rounding never accumulates
    let total = (f64::from(max_time) * f64::from(fps)).ceil() as u64;
    let pb = create_progress_bar(total, "Sampling playback");

    let mut frames = Vec::new();
    for tick in 0..total {
        let time = (tick as f64 / f64::from(fps)) as f32;
        if time >= max_time {
            break;
        }
        editor.evaluate(time)?;
        let data = editor.render_data()?;
        frames.push(Frame { time, data });
        pb.inc(1);
    }
    editor.stop_playback();
    pb.finish_and_clear();
    log::info!("Sampled {} frames over {} keyframes", frames.len(), keyframes);

    let playback = Playback {
        easing,
        fps,
        keyframes,
        frames,
    };

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &playback)?;
            writer.flush()?;
        }
        None => println!("{}", serde_json::to_string_pretty(&playback)?),
    }
    Ok(())
}
