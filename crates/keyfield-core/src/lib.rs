//! Platform-independent core of the keyword field: entities and their motion,
//! pointer picking, selection and hints, project matching, the timed unlock
//! reveal, persistence of unlocked projects, and the session tying them
//! together. Nothing here touches the browser.

pub mod burst;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod easing;
pub mod field;
pub mod matcher;
pub mod persistence;
pub mod pointer;
pub mod scheduler;
pub mod selection;
pub mod sequencer;
pub mod session;
pub mod text;
pub mod tween;
pub mod view;

pub use camera::{CameraPose, CameraRig, FlightKey};
pub use catalog::{Catalog, Project};
pub use config::FieldConfig;
pub use field::{KeywordEntity, KeywordField, KeywordId};
pub use matcher::{check_match, Match};
pub use persistence::{MemoryStore, PersistenceStore, StoreError, UnlockRecord, UnlockedProjects, STORAGE_KEY};
pub use selection::{HintLine, HintLines, SelectionState};
pub use sequencer::{RevealPhase, UnlockSequencer};
pub use session::{Frame, Session};
pub use text::{emphasize, Segment};
pub use view::{FieldPhase, RevealCue, View, ViewController, Visibility};
