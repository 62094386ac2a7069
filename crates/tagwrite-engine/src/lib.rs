//! # tagwrite-engine
//!
//! Inline tagging for an editable text surface. Typing a configured
//! trigger character (say `@`) starts a tag; the following characters
//! filter an autocomplete list; picking a candidate turns the word into an
//! atomic tag placeholder carrying the candidate's value.
//!
//! ```
//! use tagwrite_engine::{Candidate, MarkupBuffer, Session, TagSpec};
//!
//! let mut session = Session::new();
//! session
//!     .set_tags(vec![TagSpec::new("@", vec![Candidate::new("Ann", 1)])])
//!     .unwrap();
//! session.set_container(MarkupBuffer::new()).unwrap();
//!
//! for key in ["H", "i", " ", "@", "a"] {
//!     session.handle_key_name(key);
//! }
//! session.select_candidate(0);
//!
//! assert_eq!(session.plain_text(), "Hi @Ann ");
//! ```

pub mod autocomplete;
pub mod editing;
pub mod error;
pub mod export;
pub mod placeholder;
pub mod registry;
pub mod session;
pub mod settings;
pub mod surface;

pub use autocomplete::AutocompleteBridge;
pub use editing::{ArrowKey, KeyInput, KeyOutcome, TagState};
pub use error::{ConfigurationError, WordTrackerError};
pub use export::{SanitizeOptions, Segment, TagRef};
pub use placeholder::Placeholder;
pub use registry::{Candidate, TagDefinition, TagRegistry, TagSpec};
pub use session::Session;
pub use settings::Settings;
pub use surface::{EditableSurface, MarkupBuffer};
