//! Attribute combination availability engine.
//!
//! Given the combinations a product can be bought in and the shopper's
//! in-progress selection, decides which attribute values stay selectable.
//!
//! # Overview
//!
//! - [`CombinationSource`] yields the combination list (HTTP, file, memory).
//! - [`SelectionSource`] is the capability interface to the attribute pickers.
//! - [`CombinationsBehavior`] ties both together: it discovers attributes,
//!   fetches combinations once, and recomputes availability on every change.
//! - [`SharedBehavior`] serializes recomputation for multi-threaded hosts.
//!
//! A failed fetch is never an error for the shopper: the combination list is
//! treated as empty and every value ends up disabled.
//!
//! # Example
//!
//! ```no_run
//! use variant_engine::{
//!     BehaviorSettings, CombinationsBehavior, ConfiguredSource, FetchSource, ProductLayout,
//!     StaticSelection,
//! };
//!
//! async fn refresh(layout: ProductLayout) -> Result<(), variant_engine::FetchError> {
//!     let fetch_source = FetchSource::url("https://shop.example/product/7/combinations");
//!     let source = ConfiguredSource::from_settings(&fetch_source)?;
//!     let settings = BehaviorSettings::new().with_fetch_source(fetch_source);
//!     let mut behavior =
//!         CombinationsBehavior::start(settings, StaticSelection::new(layout), &source).await;
//!     if let Some(availability) = behavior.on_selection_changed() {
//!         println!("{} values enabled", availability.enabled().count());
//!     }
//!     Ok(())
//! }
//! ```

pub mod behavior;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod selection_source;
pub mod settings;
pub mod shared;

pub use behavior::{CombinationsBehavior, DisposeHandle, LoadOutcome, LoadState, ProcessedHook};
pub use engine::{AttributeValues, compute_availability, matching_combinations, value_availability};
pub use error::{EngineError, FetchError, Result};
pub use fetch::{
    CombinationSource, ConfiguredSource, FileCombinationSource, FnCombinationSource,
    HttpCombinationSource, StaticCombinationSource,
};
pub use layout::{AttributeLayout, ProductLayout, StaticSelection, ValueLayout};
pub use selection_source::SelectionSource;
pub use settings::{BehaviorSettings, ContentScope, DEFAULT_FETCH_TIMEOUT_SECS, FetchSource};
pub use shared::SharedBehavior;
