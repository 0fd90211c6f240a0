// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions
)]

//! # Triptych
//!
//! One document, three editing surfaces.
//!
//! Triptych is the mode-switching core of a rich-text editor: it presents
//! the same document through a visually-rendered (WYSIWYG) surface, a
//! raw-markup source surface, or a plain-text surface, and moves the
//! user's content between them without losing what each surface can
//! represent. Rendering and input handling belong to the host; this crate
//! owns the conversions and the switching protocol.
//!
//! ## Architecture
//!
//! - [`convert`]: pure conversions between plain text and the HTML
//!   interchange fragment: escaping, tag stripping, a pretty-printer,
//!   a sanitizer, an emptiness check
//! - [`surface`]: the host-surface boundary. An injected factory creates
//!   native surfaces; an in-memory implementation serves headless hosts
//! - [`area`]: the uniform contract over the three surface variants
//! - [`manager`]: the state machine that lazily creates areas, keeps
//!   exactly one visible, and relays content through a cache on every
//!   switch
//!
//! The plain-text surface is deliberately lossy: inline formatting does
//! not survive a detour through it, while the text itself always does.
//! The markup surface round-trips losslessly (modulo pretty-printing
//! whitespace).
//!
//! ## Example
//!
//! ```
//! use triptych::prelude::*;
//!
//! let config = ManagerConfig::new(ContainerId::new("editor-root"));
//! let mut manager = EditorManager::new(config, Box::new(MemoryFactory::new()));
//! manager.initialize();
//!
//! manager.set_content("<p>Hello <strong>World</strong></p>");
//! manager.switch_mode(Mode::Text);
//! assert_eq!(manager.area(Mode::Text).raw_content(), "Hello World");
//!
//! manager.switch_mode(Mode::Wysiwyg);
//! assert!(manager.content().contains("Hello World"));
//! ```

pub mod area;
pub mod convert;
pub mod manager;
pub mod surface;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::area::{EditingArea, MarkupArea, TextArea, WysiwygArea};
    pub use crate::convert::EMPTY_SENTINEL;
    pub use crate::manager::{
        ClassNames, EditorManager, Error, EventSink, ManagerConfig, ManagerEvent, Mode,
        SelectionCollaborator,
    };
    pub use crate::surface::{
        ContainerId, HostSurface, MemoryFactory, MemorySurface, SurfaceFactory, SurfaceOptions,
    };
}
