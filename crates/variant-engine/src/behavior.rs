//! Lifecycle of a combinations behavior bound to one selection UI.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Instrument;
use variant_model::{AttributeId, AvailabilitySet, Combination, DisabledReason, Selection};

use crate::engine::{AttributeValues, compute_availability};
use crate::error::FetchError;
use crate::fetch::CombinationSource;
use crate::selection_source::SelectionSource;
use crate::settings::BehaviorSettings;

/// Callback fired after every completed recomputation.
pub type ProcessedHook = Box<dyn FnMut(&AvailabilitySet) + Send>;

/// Progress of the one combination fetch a behavior performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotStarted,
    InFlight,
    Loaded,
    /// The fetch failed; the combination list is empty.
    Failed,
}

/// What happened to a fetch result handed to the behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Combinations stored; `recomputed` tells whether availability was refreshed.
    Loaded { count: usize, recomputed: bool },
    /// Fetch failed, combinations treated as empty.
    Failed,
    /// A fetch was already issued for this behavior.
    AlreadyRequested,
    /// The behavior was disposed; the result was dropped.
    Ignored,
}

/// Cloneable flag used to tear a behavior down from outside, e.g. while its
/// fetch is still pending on another task.
#[derive(Debug, Clone, Default)]
pub struct DisposeHandle(Arc<AtomicBool>);

impl DisposeHandle {
    pub fn dispose(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_disposed(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Keeps a selection UI's enabled/disabled values in line with the product's
/// combinations.
///
/// Typical use: [`init`](Self::init), then [`load_combinations`](Self::load_combinations),
/// then [`on_selection_changed`](Self::on_selection_changed) whenever the host
/// sees the shopper change a picker.
pub struct CombinationsBehavior<U> {
    settings: BehaviorSettings,
    ui: U,
    attribute_ids: Vec<AttributeId>,
    combinations: Vec<Combination>,
    load_state: LoadState,
    disposed: DisposeHandle,
    on_processed: Option<ProcessedHook>,
}

impl<U: fmt::Debug> fmt::Debug for CombinationsBehavior<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinationsBehavior")
            .field("settings", &self.settings)
            .field("ui", &self.ui)
            .field("attribute_ids", &self.attribute_ids)
            .field("combinations", &self.combinations.len())
            .field("load_state", &self.load_state)
            .field("disposed", &self.disposed.is_disposed())
            .finish_non_exhaustive()
    }
}

impl<U: SelectionSource> CombinationsBehavior<U> {
    pub fn new(settings: BehaviorSettings, ui: U) -> Self {
        Self {
            settings,
            ui,
            attribute_ids: Vec::new(),
            combinations: Vec::new(),
            load_state: LoadState::NotStarted,
            disposed: DisposeHandle::default(),
            on_processed: None,
        }
    }

    /// Create, initialize and load in one go.
    pub async fn start<S: CombinationSource>(
        settings: BehaviorSettings,
        ui: U,
        source: &S,
    ) -> Self {
        let mut behavior = Self::new(settings, ui);
        behavior.init();
        behavior.load_combinations(source).await;
        behavior
    }

    /// Register the callback fired after each recomputation.
    #[must_use]
    pub fn with_on_processed(
        mut self,
        hook: impl FnMut(&AvailabilitySet) + Send + 'static,
    ) -> Self {
        self.on_processed = Some(Box::new(hook));
        self
    }

    pub fn set_on_processed(&mut self, hook: impl FnMut(&AvailabilitySet) + Send + 'static) {
        self.on_processed = Some(Box::new(hook));
    }

    /// Discover the attributes declared within the content scope.
    ///
    /// Returns `false` when there are none; the behavior then stays inert.
    pub fn init(&mut self) -> bool {
        self.attribute_ids = self.ui.attribute_ids(&self.settings.content_scope);
        tracing::debug!(
            scope = %self.settings.content_scope,
            attributes = self.attribute_ids.len(),
            "initialized combinations behavior"
        );
        self.is_active()
    }

    /// Fetch the combination list once and store it.
    pub async fn load_combinations<S: CombinationSource>(&mut self, source: &S) -> LoadOutcome {
        if !self.begin_load() {
            return if self.is_disposed() {
                LoadOutcome::Ignored
            } else {
                LoadOutcome::AlreadyRequested
            };
        }
        let span = tracing::debug_span!("load_combinations", scope = %self.settings.content_scope);
        let result = source.fetch().instrument(span).await;
        self.apply_fetch_result(result)
    }

    /// Mark the fetch as in flight; `false` when one was already issued or
    /// the behavior is disposed.
    pub fn begin_load(&mut self) -> bool {
        if self.is_disposed() || self.load_state != LoadState::NotStarted {
            return false;
        }
        self.load_state = LoadState::InFlight;
        true
    }

    /// Store the outcome of the fetch started by [`begin_load`](Self::begin_load).
    pub fn apply_fetch_result(
        &mut self,
        result: Result<Vec<Combination>, FetchError>,
    ) -> LoadOutcome {
        if self.is_disposed() {
            tracing::debug!("dropping combinations that arrived after disposal");
            return LoadOutcome::Ignored;
        }
        match result {
            Ok(combinations) => {
                let count = combinations.len();
                self.combinations = combinations;
                self.load_state = LoadState::Loaded;
                tracing::debug!(count, "combinations loaded");
                let recomputed = self.selection().has_entries();
                if recomputed {
                    self.process_combinations();
                }
                LoadOutcome::Loaded { count, recomputed }
            }
            Err(error) => {
                tracing::warn!(%error, "failed to load combinations, disabling all values");
                self.combinations = Vec::new();
                self.load_state = LoadState::Failed;
                LoadOutcome::Failed
            }
        }
    }

    /// Entry point for the host's selection-change notification.
    pub fn on_selection_changed(&mut self) -> Option<AvailabilitySet> {
        if self.is_disposed() {
            return None;
        }
        self.process_combinations()
    }

    /// Recompute availability for every known value, push it to the UI and
    /// fire the processed hook.
    ///
    /// Returns `None` when no attributes are known.
    pub fn process_combinations(&mut self) -> Option<AvailabilitySet> {
        if !self.is_active() {
            return None;
        }
        let scope = &self.settings.content_scope;
        let _span = tracing::debug_span!("process_combinations", scope = %scope).entered();

        let availability = if self.combinations.is_empty() {
            AvailabilitySet::all_disabled(
                self.ui
                    .value_ids(scope, None)
                    .into_iter()
                    .filter(|value| value.is_assigned()),
                DisabledReason::NoCombinationData,
            )
        } else {
            let selection = self.ui.selection(scope, &self.attribute_ids);
            let layout: Vec<AttributeValues> = self
                .attribute_ids
                .iter()
                .map(|&attribute| {
                    AttributeValues::new(attribute, self.ui.value_ids(scope, Some(attribute)))
                })
                .collect();
            compute_availability(&layout, &selection, &self.combinations)
        };

        for (value, state) in availability.iter() {
            self.ui.set_value_enabled(scope, value, state.is_enabled());
        }
        tracing::debug!(
            values = availability.len(),
            enabled = availability.enabled().count(),
            "availability recomputed"
        );
        if let Some(hook) = self.on_processed.as_mut() {
            hook(&availability);
        }
        Some(availability)
    }

    /// Current selection of every known attribute, empty choices included.
    pub fn selection(&self) -> Selection {
        self.ui.selection(&self.settings.content_scope, &self.attribute_ids)
    }

    /// Whether any attribute was discovered by [`init`](Self::init).
    pub fn is_active(&self) -> bool {
        !self.attribute_ids.is_empty()
    }

    pub fn dispose(&self) {
        self.disposed.dispose();
    }

    pub fn dispose_handle(&self) -> DisposeHandle {
        self.disposed.clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.is_disposed()
    }

    pub fn settings(&self) -> &BehaviorSettings {
        &self.settings
    }

    pub fn attribute_ids(&self) -> &[AttributeId] {
        &self.attribute_ids
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Mutable access for hosts that drive the UI state themselves; call
    /// [`on_selection_changed`](Self::on_selection_changed) afterwards.
    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn into_ui(self) -> U {
        self.ui
    }
}
