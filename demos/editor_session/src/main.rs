//! Editor Session Example
//!
//! Plays one edit -> play -> edit cycle against an in-memory scene. The
//! avatar's bone settings are tweaked while "playing"; with playsave enabled
//! the tweaks survive the return to edit mode.

use anyhow::Result;
use clap::Parser;
use playsave_core::math::{Color, Vec3};
use playsave_core::{
    FieldKind, FieldValue, ObjectId, PlayModeSaver, SaverConfig, Scene, SessionTransition,
    TemplateOrigin, TransitionOutcome,
};
use playsave_prefs::FilePreferences;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "editor_session")]
#[command(about = "Run a scripted play session and keep the edits made during it", long_about = None)]
struct Cli {
    /// Preference file holding the enable flag
    #[arg(long, default_value = "playsave-prefs.ron")]
    prefs: PathBuf,

    /// Optional RON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Turn playsave on or off before running
    #[arg(long)]
    enabled: Option<bool>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "editor_session=debug,playsave_core=debug,playsave_prefs=debug"
    } else {
        "editor_session=info,playsave_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => SaverConfig::load(path)?,
        None => SaverConfig::default(),
    };
    let prefs = FilePreferences::open(&cli.prefs)?;
    let mut saver = PlayModeSaver::new(config, prefs);
    if let Some(enabled) = cli.enabled {
        saver.set_enabled(enabled)?;
    }
    info!(enabled = saver.is_enabled(), prefs = %cli.prefs.display(), "playsave ready");

    let mut edit = build_scene();
    let (bone, light, renderer) = (ObjectId::new(2), ObjectId::new(3), ObjectId::new(4));
    print_scene("Edit mode (before play)", &edit);

    saver.handle_transition(SessionTransition::Starting, &mut edit);

    // Entering play mode: the play scene is a copy with identical identities
    let mut play = edit.clone();
    if let Some(object) = play.object_mut(bone) {
        object.set("pull", 0.35f64);
        object.set("stiffness", 0.8f64);
        object.set("immobileType", FieldValue::enum_index(1));
    }
    if let Some(object) = play.object_mut(light) {
        object.set("color", Color::new(1.0, 0.6, 0.3, 1.0));
        object.set("range", 14.0f64);
    }
    if let Some(object) = play.object_mut(renderer) {
        object.set("receiveShadows", false);
    }
    print_scene("Play mode (tweaked)", &play);

    match saver.handle_transition(SessionTransition::Ending, &mut play) {
        TransitionOutcome::Captured(report) => println!(
            "Captured {} objects ({} fields), skipped {}\n",
            report.captured, report.fields, report.skipped
        ),
        TransitionOutcome::Disabled => println!("playsave disabled, nothing captured\n"),
        _ => {}
    }

    match saver.handle_transition(SessionTransition::Ended, &mut edit) {
        TransitionOutcome::Restored(report) => println!(
            "Restored {} of {} stored objects ({} fields written, {} skipped)\n",
            report.matched, report.stored, report.fields_written, report.fields_skipped
        ),
        TransitionOutcome::Disabled => println!("playsave disabled, nothing restored\n"),
        _ => {}
    }
    print_scene("Edit mode (after play)", &edit);

    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    scene
        .create("Transform")
        .define("localPosition", Vec3::new(0.0, 1.2, 0.0))
        .define("localScale", Vec3::new(1.0, 1.0, 1.0));

    scene
        .create("PhysBone")
        .define("pull", 0.2f64)
        .define("spring", 0.2f64)
        .define("stiffness", 0.2f64)
        .define("immobileType", FieldValue::enum_index(0))
        .define("rootTransform", ObjectId::new(1))
        .define_composite("colliders", FieldKind::Generic);

    scene
        .create("Light")
        .define("color", Color::new(1.0, 1.0, 1.0, 1.0))
        .define("range", 10.0f64)
        .define("shadows", FieldValue::enum_index(2));

    scene.create("MeshRenderer").define("receiveShadows", true);

    let decoration = scene.create("PhysBone");
    decoration.origin = TemplateOrigin::Instance;
    decoration.define("pull", 0.5f64);

    scene
}

fn print_scene(title: &str, scene: &Scene) {
    println!("=== {} ===", title);
    for object in scene.iter() {
        println!("  {} [{}]", object.id, object.kind);
        for field in playsave_core::Inspectable::fields(object) {
            match object.get(field.path.as_str()) {
                Some(value) => println!("    {} = {}", field.path, value),
                None => println!("    {} <{}>", field.path, field.kind),
            }
        }
    }
    println!();
}
