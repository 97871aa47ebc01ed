//! Playsave Core - Keep edits made during a play session
//!
//! This crate provides the snapshot/restore engine behind playsave:
//! - Typed leaf values (`FieldValue`, `FieldKind`) and their conversion table
//! - The inspection seam the host implements (`ObjectGraph`, `Inspectable`)
//! - Per-object snapshots and the session-scoped `SnapshotStore`
//! - `SnapshotEngine` for the capture and restore passes
//! - `PlayModeSaver`, which ties the passes to the host's lifecycle signals
//!   behind a persisted enable flag
//!
//! ## Lifecycle
//!
//! ```rust
//! use playsave_core::{FieldValue, MemoryPreferences, ObjectId, PlayModeSaver, Scene};
//!
//! let mut edit = Scene::new();
//! edit.create("PhysBone").define("pull", 0.2f64);
//! let bone = ObjectId::new(1);
//!
//! let mut saver = PlayModeSaver::with_prefs(MemoryPreferences::new());
//! saver.on_session_starting();
//!
//! let mut play = edit.clone();
//! play.object_mut(bone).unwrap().set("pull", 0.5f64);
//! saver.on_session_ending(&play);
//!
//! saver.on_session_ended(&mut edit);
//! assert_eq!(edit.object(bone).unwrap().get("pull"), Some(&FieldValue::Float(0.5)));
//! ```

mod config;
mod engine;
mod error;
mod filter;
mod identity;
mod inspect;
pub mod math;
mod prefs;
mod scene;
mod session;
mod snapshot;
mod value;
mod write_set;

pub use config::{SaverConfig, DEFAULT_ENABLED_KEY};
pub use engine::{CaptureReport, RestoreReport, SnapshotEngine};
pub use error::{Error, Result};
pub use filter::{ExclusionFilter, SkipReason};
pub use identity::{FieldPath, ObjectId, ObjectKind};
pub use inspect::{FieldDescriptor, Inspectable, ObjectGraph, TemplateOrigin};
pub use prefs::{MemoryPreferences, Preferences};
pub use scene::{Scene, SceneField, SceneObject};
pub use session::{PlayModeSaver, SessionPhase, SessionTransition, TransitionOutcome};
pub use snapshot::{Snapshot, SnapshotStore};
pub use value::{FieldKind, FieldValue};
pub use write_set::{PendingWrite, WriteSet};
