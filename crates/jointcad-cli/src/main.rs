//! jointcad CLI - demo and scenario runner for the derivation engine
//!
//! Builds a box assembly from flags or a scenario file, dispatches its
//! actions, and prints the resulting snapshot as pretty JSON. There is no
//! TUI here: rendering and persistence are out of scope for this binary.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jointcad_engine::assembly::Assembly;
use jointcad_engine::dispatch::dispatch;
use jointcad_engine::scene::Scene;
use jointcad_ir::{Action, AssemblyConfig, FaceId, MaterialConfig};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "jointcad")]
#[command(about = "Parametric finger-jointed box derivation engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a box from dimensions/material flags and print its snapshot.
    Demo {
        #[arg(long, default_value_t = 200.0)]
        width: f64,
        #[arg(long, default_value_t = 120.0)]
        height: f64,
        #[arg(long, default_value_t = 150.0)]
        depth: f64,
        #[arg(long, default_value_t = 3.0)]
        thickness: f64,
        #[arg(long = "finger-width", default_value_t = 10.0)]
        finger_width: f64,
        #[arg(long = "finger-gap", default_value_t = 1.5)]
        finger_gap: f64,
        /// Faces to leave open (front, back, left, right, top, bottom);
        /// may be repeated. Default: all solid.
        #[arg(long = "open")]
        open_faces: Vec<String>,
        /// Evenly spaced absolute X positions to place dividers at.
        #[arg(long = "grid-x", value_delimiter = ',')]
        grid_x: Vec<f64>,
        #[arg(long = "grid-y", value_delimiter = ',')]
        grid_y: Vec<f64>,
        #[arg(long = "grid-z", value_delimiter = ',')]
        grid_z: Vec<f64>,
    },
    /// Run a scenario file (initial dimensions plus an action list) and
    /// print or write the resulting snapshot.
    Run {
        /// Path to a scenario JSON file.
        scenario: PathBuf,
        /// Write the snapshot here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Run a scenario file and print a short summary instead of the full
    /// snapshot.
    Info {
        scenario: PathBuf,
    },
}

/// The on-disk shape a scenario file takes: starting dimensions/material plus
/// the action stream to replay against them.
#[derive(Deserialize)]
struct Scenario {
    width: f64,
    height: f64,
    depth: f64,
    #[serde(default)]
    material: MaterialConfig,
    #[serde(default)]
    assembly_config: AssemblyConfig,
    #[serde(default)]
    actions: Vec<Action>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            width,
            height,
            depth,
            thickness,
            finger_width,
            finger_gap,
            open_faces,
            grid_x,
            grid_y,
            grid_z,
        } => {
            let material = MaterialConfig {
                thickness,
                finger_width,
                finger_gap,
            };
            let assembly = Assembly::new(width, height, depth, material, AssemblyConfig::default());
            let mut scene = Scene::new(assembly);

            for name in &open_faces {
                let face = parse_face(name)?;
                let result = dispatch(
                    &mut scene,
                    Action::SetFaceSolid {
                        assembly_id: scene.primary.id.clone(),
                        face_id: face,
                        solid: false,
                    },
                );
                if !result.success {
                    bail!("failed to open face {name}: {:?}", result.reason);
                }
            }

            run_demo_grid(&mut scene, jointcad_ir::Axis::X, &grid_x)?;
            run_demo_grid(&mut scene, jointcad_ir::Axis::Y, &grid_y)?;
            run_demo_grid(&mut scene, jointcad_ir::Axis::Z, &grid_z)?;

            print_snapshot(&scene)?;
        }
        Commands::Run { scenario, out } => {
            let scene = run_scenario(&scenario)?;
            let snapshot = scene.active().snapshot();
            let json = serde_json::to_string_pretty(&snapshot)?;
            match out {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("Wrote snapshot to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Info { scenario } => {
            let scene = run_scenario(&scenario)?;
            show_info(&scene);
        }
    }

    Ok(())
}

/// Issues a single root-void grid subdivision for one axis, if any positions
/// were given. The demo only ever subdivides the root void; scenario files
/// can target nested voids directly via `GridSubdivideVoid`.
fn run_demo_grid(scene: &mut Scene, axis: jointcad_ir::Axis, positions: &[f64]) -> Result<()> {
    if positions.is_empty() {
        return Ok(());
    }
    let void_id = scene.primary.root_void.id.clone();
    let result = dispatch(
        scene,
        Action::GridSubdivideVoid {
            void_id,
            specs: vec![jointcad_ir::GridAxisSpec {
                axis,
                positions: positions.to_vec(),
                mode: jointcad_ir::SplitMode::Absolute,
            }],
        },
    );
    if !result.success {
        bail!("grid subdivide on {axis:?} failed: {:?}", result.reason);
    }
    Ok(())
}

fn parse_face(name: &str) -> Result<FaceId> {
    match name.to_lowercase().as_str() {
        "front" => Ok(FaceId::Front),
        "back" => Ok(FaceId::Back),
        "left" => Ok(FaceId::Left),
        "right" => Ok(FaceId::Right),
        "top" => Ok(FaceId::Top),
        "bottom" => Ok(FaceId::Bottom),
        other => bail!("unknown face \"{other}\" (expected front/back/left/right/top/bottom)"),
    }
}

fn run_scenario(path: &PathBuf) -> Result<Scene> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let scenario: Scenario = serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;

    let assembly = Assembly::new(
        scenario.width,
        scenario.height,
        scenario.depth,
        scenario.material,
        scenario.assembly_config,
    );
    let mut scene = Scene::new(assembly);

    for (i, action) in scenario.actions.into_iter().enumerate() {
        let result = dispatch(&mut scene, action);
        if !result.success {
            bail!("action {i} failed: {}", result.reason.unwrap_or_default());
        }
    }

    Ok(scene)
}

fn print_snapshot(scene: &Scene) -> Result<()> {
    let snapshot = scene.active().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn show_info(scene: &Scene) {
    let assembly = scene.active();
    let snapshot = assembly.snapshot();

    println!(
        "assembly: {:.1} x {:.1} x {:.1} mm, {:.1}mm material",
        snapshot.width, snapshot.height, snapshot.depth, snapshot.material.thickness
    );
    println!("  panels: {}", snapshot.panels.len());
    for panel in &snapshot.panels {
        let label = match &panel.kind {
            jointcad_ir::PanelKind::Face { face_id } => format!("face:{face_id:?}"),
            jointcad_ir::PanelKind::Divider { axis, position, .. } => {
                format!("divider:{axis:?}@{position:.1}")
            }
        };
        println!(
            "    {label:<24} {:.1} x {:.1} mm, {} hole(s)",
            panel.width,
            panel.height,
            panel.outline.holes.len()
        );
    }
    if snapshot.joint_errors.is_empty() {
        println!("  joints: all aligned");
    } else {
        println!("  joints: {} misalignment(s)", snapshot.joint_errors.len());
        for err in &snapshot.joint_errors {
            println!(
                "    {} ({:?}) <-> {} ({:?}): {:.4}mm",
                err.panel_a_id, err.edge_a, err.panel_b_id, err.edge_b, err.error.magnitude
            );
        }
    }
}
