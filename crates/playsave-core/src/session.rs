//! Session lifecycle service
//!
//! `PlayModeSaver` owns the snapshot store for one edit/simulate cycle and
//! reacts to the host's three lifecycle signals:
//!
//! ```text
//! Editing --SessionStarting--> Simulating --SessionEnding--> Exiting --SessionEnded--> Editing
//!            clear store                    capture                     restore
//! ```
//!
//! Capture and restore only run while the enable flag is set. The flag is
//! read from the host's preference store on every transition.

use crate::error::Result;
use crate::{
    CaptureReport, ObjectGraph, Preferences, RestoreReport, SaverConfig, SnapshotEngine,
    SnapshotStore,
};
use tracing::{debug, warn};

/// Where the host currently is in the edit/simulate cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Editing,
    Simulating,
    /// Simulation is shutting down; objects still hold simulated values
    Exiting,
}

/// Lifecycle signal sent by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTransition {
    Starting,
    Ending,
    Ended,
}

impl SessionTransition {
    fn expected_phase(&self) -> SessionPhase {
        match self {
            SessionTransition::Starting => SessionPhase::Editing,
            SessionTransition::Ending => SessionPhase::Simulating,
            SessionTransition::Ended => SessionPhase::Exiting,
        }
    }

    fn next_phase(&self) -> SessionPhase {
        match self {
            SessionTransition::Starting => SessionPhase::Simulating,
            SessionTransition::Ending => SessionPhase::Exiting,
            SessionTransition::Ended => SessionPhase::Editing,
        }
    }
}

/// What a transition did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Store cleared for a new session
    Started,
    Captured(CaptureReport),
    Restored(RestoreReport),
    /// The enable flag is off; nothing was enumerated or stored
    Disabled,
}

/// Keeps edits made during simulation by capturing them before the session
/// ends and writing them back once editing resumes
#[derive(Debug)]
pub struct PlayModeSaver<P> {
    config: SaverConfig,
    engine: SnapshotEngine,
    store: SnapshotStore,
    prefs: P,
    phase: SessionPhase,
}

impl<P: Preferences> PlayModeSaver<P> {
    pub fn new(config: SaverConfig, prefs: P) -> Self {
        let engine = SnapshotEngine::from_config(&config);
        Self {
            config,
            engine,
            store: SnapshotStore::new(),
            prefs,
            phase: SessionPhase::Editing,
        }
    }

    /// Create a saver with the default configuration
    pub fn with_prefs(prefs: P) -> Self {
        Self::new(SaverConfig::default(), prefs)
    }

    /// Read the enable flag from the preference store
    pub fn is_enabled(&self) -> bool {
        self.prefs.get_bool(&self.config.enabled_key, self.config.enabled_default)
    }

    /// Persist the enable flag
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.prefs.set_bool(&self.config.enabled_key, enabled)
    }

    pub fn config(&self) -> &SaverConfig {
        &self.config
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    /// Dispatch one lifecycle signal
    pub fn handle_transition<G>(
        &mut self,
        transition: SessionTransition,
        graph: &mut G,
    ) -> TransitionOutcome
    where
        G: ObjectGraph + ?Sized,
    {
        match transition {
            SessionTransition::Starting => {
                self.on_session_starting();
                TransitionOutcome::Started
            }
            SessionTransition::Ending => self
                .on_session_ending(&*graph)
                .map_or(TransitionOutcome::Disabled, TransitionOutcome::Captured),
            SessionTransition::Ended => self
                .on_session_ended(graph)
                .map_or(TransitionOutcome::Disabled, TransitionOutcome::Restored),
        }
    }

    /// Simulation is about to start; forget the previous session
    pub fn on_session_starting(&mut self) {
        self.advance(SessionTransition::Starting);
        self.store.begin_session();
    }

    /// Simulation is about to end; capture if enabled
    pub fn on_session_ending<G>(&mut self, graph: &G) -> Option<CaptureReport>
    where
        G: ObjectGraph + ?Sized,
    {
        self.advance(SessionTransition::Ending);
        if !self.is_enabled() {
            debug!("capture disabled");
            return None;
        }
        Some(self.engine.capture(graph, &mut self.store))
    }

    /// Editing has resumed; restore if enabled
    pub fn on_session_ended<G>(&mut self, graph: &mut G) -> Option<RestoreReport>
    where
        G: ObjectGraph + ?Sized,
    {
        self.advance(SessionTransition::Ended);
        if !self.is_enabled() {
            debug!("restore disabled");
            return None;
        }
        Some(self.engine.restore(graph, &self.store))
    }

    fn advance(&mut self, transition: SessionTransition) {
        let expected = transition.expected_phase();
        if self.phase != expected {
            warn!(
                ?transition,
                phase = ?self.phase,
                ?expected,
                "lifecycle signal out of order"
            );
        }
        self.phase = transition.next_phase();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldValue, Inspectable, MemoryPreferences, ObjectId, Scene};
    use std::cell::Cell;

    /// Graph wrapper that counts enumeration calls
    struct CountingGraph {
        scene: Scene,
        enumerations: Cell<usize>,
    }

    impl ObjectGraph for CountingGraph {
        fn instances(&self, include_inactive: bool) -> Vec<ObjectId> {
            self.enumerations.set(self.enumerations.get() + 1);
            self.scene.instances(include_inactive)
        }

        fn get(&self, id: ObjectId) -> Option<&dyn Inspectable> {
            self.scene.get(id)
        }

        fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn Inspectable> {
            self.scene.get_mut(id)
        }
    }

    fn edit_scene() -> Scene {
        let mut scene = Scene::new();
        scene
            .create("PhysBone")
            .define("pull", 0.2f64)
            .define("spring", 0.4f64);
        scene.create("Transform").define("localScale", 1.0f64);
        scene
    }

    #[test]
    fn test_full_cycle_keeps_play_edits() {
        let mut saver = PlayModeSaver::with_prefs(MemoryPreferences::new());
        let mut edit = edit_scene();
        let bone = ObjectId::new(1);

        saver.on_session_starting();
        let mut play = edit.clone();
        play.object_mut(bone).unwrap().set("pull", 0.7f64);

        let captured = saver.on_session_ending(&play).unwrap();
        assert_eq!(captured.captured, 1);
        assert_eq!(saver.phase(), SessionPhase::Exiting);

        let restored = saver.on_session_ended(&mut edit).unwrap();
        assert_eq!(restored.matched, 1);
        assert_eq!(saver.phase(), SessionPhase::Editing);
        assert_eq!(edit.object(bone).unwrap().get("pull"), Some(&FieldValue::Float(0.7)));
        assert_eq!(edit.object(bone).unwrap().get("spring"), Some(&FieldValue::Float(0.4)));
    }

    #[test]
    fn test_disabled_flag_is_a_no_op() {
        let mut saver = PlayModeSaver::with_prefs(MemoryPreferences::new());
        saver.set_enabled(false).unwrap();
        assert!(!saver.is_enabled());

        let mut graph = CountingGraph {
            scene: edit_scene(),
            enumerations: Cell::new(0),
        };

        assert_eq!(
            saver.handle_transition(SessionTransition::Starting, &mut graph),
            TransitionOutcome::Started
        );
        assert_eq!(
            saver.handle_transition(SessionTransition::Ending, &mut graph),
            TransitionOutcome::Disabled
        );
        assert_eq!(
            saver.handle_transition(SessionTransition::Ended, &mut graph),
            TransitionOutcome::Disabled
        );

        assert_eq!(graph.enumerations.get(), 0);
        assert!(saver.store().is_empty());
        assert_eq!(graph.scene.object(ObjectId::new(1)).unwrap().commit_count(), 0);
    }

    #[test]
    fn test_session_start_clears_previous_snapshots() {
        let mut saver = PlayModeSaver::with_prefs(MemoryPreferences::new());
        let mut scene = edit_scene();

        saver.handle_transition(SessionTransition::Starting, &mut scene);
        saver.handle_transition(SessionTransition::Ending, &mut scene);
        saver.handle_transition(SessionTransition::Ended, &mut scene);
        assert_eq!(saver.store().len(), 1);

        saver.handle_transition(SessionTransition::Starting, &mut scene);
        assert!(saver.store().is_empty());
        assert_eq!(saver.phase(), SessionPhase::Simulating);
    }

    #[test]
    fn test_disabling_mid_session_skips_restore() {
        let mut saver = PlayModeSaver::with_prefs(MemoryPreferences::new());
        let mut edit = edit_scene();
        let bone = ObjectId::new(1);

        saver.on_session_starting();
        let mut play = edit.clone();
        play.object_mut(bone).unwrap().set("pull", 0.9f64);
        assert!(saver.on_session_ending(&play).is_some());

        saver.set_enabled(false).unwrap();
        assert!(saver.on_session_ended(&mut edit).is_none());
        assert_eq!(edit.object(bone).unwrap().get("pull"), Some(&FieldValue::Float(0.2)));
    }

    #[test]
    fn test_out_of_order_signal_still_handled() {
        let mut saver = PlayModeSaver::with_prefs(MemoryPreferences::new());
        let scene = edit_scene();

        // Ending without Starting: logged, capture still runs
        let report = saver.on_session_ending(&scene).unwrap();
        assert_eq!(report.captured, 1);
        assert_eq!(saver.phase(), SessionPhase::Exiting);
    }

    #[test]
    fn test_custom_enabled_key() {
        let config = SaverConfig {
            enabled_key: "tools.autosave".to_string(),
            enabled_default: false,
            ..SaverConfig::default()
        };
        let mut saver = PlayModeSaver::new(config, MemoryPreferences::new());
        assert!(!saver.is_enabled());

        saver.set_enabled(true).unwrap();
        assert!(saver.prefs().get_bool("tools.autosave", false));
        assert!(!saver.prefs().get_bool(crate::DEFAULT_ENABLED_KEY, false));
    }
}
