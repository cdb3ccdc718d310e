//! # physprac
//!
//! Course catalog, navigation and formula-entry state for the physics
//! practice web app.
//!
//! Everything here is plain host Rust so it can be unit-tested without a
//! browser; `physprac_web` drives it from Leptos and talks to the DOM.
//!
//! ## Quick Start
//!
//! ```
//! use physprac::prelude::*;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut nav = Navigator::new();
//! let mut loader = ViewLoader::new("views");
//!
//! let target = nav.select_course(&catalog, "thermo").unwrap();
//! let ticket = loader.begin(target.clone());
//! let plan = loader.complete(ticket, Ok("<h2>Problems</h2>".to_string())).unwrap();
//! loader.mount(plan).unwrap();
//! nav.enter(target);
//!
//! let session = ProblemSession::open(&catalog, "thermo", "t1").unwrap();
//! assert_eq!(session.title(), "Ideal Gas Law");
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: static courses and problems
//! - [`view`]: screens, fragment paths and asset policy
//! - [`loader`]: single-slot fragment ownership with stale-load rejection
//! - [`navigation`]: screen transitions
//! - [`formula`], [`toolbar`], [`session`], [`submission`]: the problem-solving screen
//! - [`markup`], [`typeset`]: statement rendering and math typesetter options
//! - [`config`], [`error`]

#[path = "core/catalog.rs"]
pub mod catalog;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/formula.rs"]
pub mod formula;

#[path = "core/loader.rs"]
pub mod loader;

#[path = "core/markup.rs"]
pub mod markup;

#[path = "core/navigation.rs"]
pub mod navigation;

#[path = "core/session.rs"]
pub mod session;

#[path = "core/submission.rs"]
pub mod submission;

#[path = "core/toolbar.rs"]
pub mod toolbar;

#[path = "core/typeset.rs"]
pub mod typeset;

#[path = "core/view.rs"]
pub mod view;

/// Prelude module for convenient imports.
///
/// ```
/// use physprac::prelude::*;
/// ```
pub mod prelude {
    pub use crate::catalog::{Catalog, Course, Problem};
    pub use crate::config::{AppConfig, FormulaWidgetOptions};
    pub use crate::error::{CatalogError, ConfigError, LoadError, NavError, TypesetError};
    pub use crate::formula::{FieldId, FormulaField, FormulaFields};
    pub use crate::loader::{
        CompanionSwap, LoadTicket, MountHandle, MountPlan, MountedView, ViewLoader, VIEW_SCRIPT_ID,
        VIEW_STYLE_ID,
    };
    pub use crate::navigation::Navigator;
    pub use crate::session::ProblemSession;
    pub use crate::submission::Submission;
    pub use crate::toolbar::{Dropdown, ToolbarCommand};
    pub use crate::typeset::{MathDelimiter, TypesetOptions};
    pub use crate::view::{ViewAssets, ViewName, ViewState};
}
