//! Command implementations shared by the binary and the tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};
use variant_engine::{
    BehaviorSettings, CombinationSource, CombinationsBehavior, ConfiguredSource, ContentScope,
    FetchSource, LoadState, ProductLayout, StaticSelection,
};
use variant_model::{AttributeSelection, AvailabilitySet, Combination};

use crate::report::AvailabilityReport;

/// Where the combination list is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombinationInput {
    File(PathBuf),
    Url { url: String, timeout_secs: u64 },
}

impl CombinationInput {
    fn fetch_source(&self) -> FetchSource {
        match self {
            Self::File(path) => FetchSource::file(path.clone()),
            Self::Url { url, timeout_secs } => FetchSource::Url {
                url: url.clone(),
                timeout_secs: *timeout_secs,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Text,
    Json,
}

/// Inputs of the `check` command.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub layout: PathBuf,
    pub input: CombinationInput,
    pub scope: Option<String>,
    pub selections: Vec<AttributeSelection>,
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")
}

/// Load a layout, fetch combinations, apply the selection and recompute.
pub fn run_check(request: &CheckRequest) -> Result<AvailabilityReport> {
    let span = info_span!("check", layout = %request.layout.display());
    let _guard = span.enter();

    let layout = ProductLayout::from_json_file(&request.layout).context("load product layout")?;
    let mut ui = StaticSelection::new(layout);
    for selection in &request.selections {
        if !ui.apply_selection(selection) {
            warn!(
                attribute = %selection.attribute_id,
                "selected attribute is not part of the layout"
            );
        }
    }

    let scope = request
        .scope
        .clone()
        .map_or(ContentScope::All, ContentScope::Element);
    let fetch_source = request.input.fetch_source();
    let settings = BehaviorSettings::new()
        .with_content_scope(scope)
        .with_fetch_source(fetch_source.clone());
    settings.validate().context("validate settings")?;
    let source = ConfiguredSource::from_settings(&fetch_source)
        .with_context(|| format!("prepare combination source {fetch_source}"))?;

    let latest = Arc::new(Mutex::new(None::<AvailabilitySet>));
    let recomputations = Arc::new(AtomicUsize::new(0));
    let mut behavior = CombinationsBehavior::new(settings, ui).with_on_processed({
        let latest = Arc::clone(&latest);
        let recomputations = Arc::clone(&recomputations);
        move |set| {
            recomputations.fetch_add(1, Ordering::Relaxed);
            *latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(set.clone());
        }
    });
    behavior.init();
    runtime()?.block_on(behavior.load_combinations(&source));
    if behavior.load_state() == LoadState::Failed {
        warn!(source = %fetch_source, "combinations unavailable, every value will be disabled");
    }
    // A successful load already recomputed; only inert or failed loads need a pass.
    let loaded = latest.lock().unwrap_or_else(PoisonError::into_inner).take();
    let availability = match loaded {
        Some(set) => set,
        None => behavior.on_selection_changed().unwrap_or_default(),
    };
    info!(
        attributes = behavior.attribute_ids().len(),
        combinations = behavior.combinations().len(),
        enabled = availability.enabled().count(),
        "availability computed"
    );

    Ok(AvailabilityReport::build(
        behavior.ui(),
        behavior.attribute_ids(),
        &availability,
        behavior.load_state(),
        behavior.combinations().len(),
        recomputations.load(Ordering::Relaxed),
    ))
}

/// Fetch the combination list; unlike `check`, a failed fetch is an error here.
pub fn run_combinations(input: &CombinationInput) -> Result<Vec<Combination>> {
    let fetch_source = input.fetch_source();
    let source = ConfiguredSource::from_settings(&fetch_source)
        .with_context(|| format!("prepare combination source {fetch_source}"))?;
    let combinations = runtime()?
        .block_on(source.fetch())
        .with_context(|| format!("fetch combinations from {fetch_source}"))?;
    info!(count = combinations.len(), "combinations fetched");
    Ok(combinations)
}
