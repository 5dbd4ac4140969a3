#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
//! Testing harness for Canopy.
//!
//! - [`Selector`]: CSS-like selectors (`rect.tile[data-name='Action']`)
//! - [`Harness`]: queries and assertions over recorded draw commands
//! - [`fixture`]: bundled datasets and an in-memory [`FixtureSource`]
//!
//! ```
//! use canopy::{render_treemap, AppConfig, DatasetRegistry};
//! use canopy_test::{FixtureSource, Harness};
//!
//! let rendering = render_treemap(
//!     &AppConfig::default(),
//!     &DatasetRegistry::builtin(),
//!     "data=movies",
//!     &FixtureSource::builtin(),
//! )
//! .unwrap();
//! Harness::new(rendering.treemap_commands)
//!     .assert_count("rect.tile", 5)
//!     .assert_attr("rect.tile[data-name='Action']", "data-value", "500");
//! ```

pub mod fixture;
mod harness;
mod selector;

pub use fixture::{movies_fixture, videogames_fixture, FixtureSource};
pub use harness::Harness;
pub use selector::{Selector, SelectorError, SelectorParser};
