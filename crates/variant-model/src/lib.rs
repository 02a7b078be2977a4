//! Data model for product variant availability.
//!
//! A product exposes attributes (Color, Size, ...) whose values can only be
//! bought in certain [`Combination`]s. The shopper's in-progress [`Selection`]
//! and the published combinations together decide the [`AvailabilitySet`].

pub mod availability;
pub mod combination;
pub mod error;
pub mod ids;
pub mod selection;

pub use availability::{Availability, AvailabilitySet, DisabledReason};
pub use combination::{Combination, CombinationAttribute};
pub use error::{ModelError, Result};
pub use ids::{AttributeId, ValueId};
pub use selection::{AttributeSelection, Selection};
