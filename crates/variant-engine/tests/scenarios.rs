//! Availability scenarios for a Color x Size product.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{BLUE, COLOR, GREEN, LARGE, MEDIUM, RED, SIZE, SMALL, combination, product_ui};
use variant_engine::{
    BehaviorSettings, CombinationsBehavior, FetchError, FnCombinationSource, LoadOutcome,
    LoadState, StaticCombinationSource, StaticSelection,
};
use variant_model::{AvailabilitySet, Combination, DisabledReason, ValueId};

fn behavior_with(combinations: Vec<Combination>) -> CombinationsBehavior<StaticSelection> {
    let mut behavior = CombinationsBehavior::new(BehaviorSettings::new(), product_ui());
    assert!(behavior.init());
    behavior.begin_load();
    behavior.apply_fetch_result(Ok(combinations));
    behavior
}

fn enabled(set: &AvailabilitySet) -> Vec<ValueId> {
    set.enabled().collect()
}

#[test]
fn single_in_stock_combination_enables_only_its_values() {
    let mut behavior =
        behavior_with(vec![combination(&[(COLOR, &[RED]), (SIZE, &[SMALL])], true)]);

    let set = behavior.on_selection_changed().expect("behavior is active");

    assert_eq!(enabled(&set), vec![RED, SMALL]);
    for value in [BLUE, GREEN, MEDIUM, LARGE] {
        assert_eq!(set.is_enabled(value), Some(false), "{value} should be disabled");
    }
    assert_eq!(behavior.ui().is_enabled(RED), Some(true));
    assert_eq!(behavior.ui().is_enabled(BLUE), Some(false));
}

#[test]
fn out_of_stock_combination_disables_everything() {
    let mut behavior =
        behavior_with(vec![combination(&[(COLOR, &[RED]), (SIZE, &[SMALL])], false)]);

    let set = behavior.on_selection_changed().expect("behavior is active");

    assert_eq!(set.enabled().count(), 0);
    assert_eq!(set.get(RED).and_then(|a| a.reason()), Some(DisabledReason::OutOfStock));
    assert_eq!(set.get(BLUE).and_then(|a| a.reason()), Some(DisabledReason::NoMatch));
}

#[test]
fn unselected_attributes_do_not_constrain_others() {
    let mut behavior = behavior_with(vec![
        combination(&[(COLOR, &[RED]), (SIZE, &[SMALL])], true),
        combination(&[(COLOR, &[BLUE]), (SIZE, &[MEDIUM])], true),
    ]);
    behavior.ui_mut().select(COLOR, &[RED]);

    let set = behavior.on_selection_changed().expect("behavior is active");

    assert_eq!(set.is_enabled(SMALL), Some(true));
    assert_eq!(set.is_enabled(MEDIUM), Some(false));
    assert_eq!(set.is_enabled(RED), Some(true));
    // Size is still unselected, so Blue is judged against every Blue combination.
    assert_eq!(set.is_enabled(BLUE), Some(true));
    assert_eq!(set.is_enabled(GREEN), Some(false));
}

#[test]
fn selecting_a_size_narrows_colors() {
    let mut behavior = behavior_with(vec![
        combination(&[(COLOR, &[RED]), (SIZE, &[SMALL])], true),
        combination(&[(COLOR, &[BLUE]), (SIZE, &[MEDIUM])], true),
        combination(&[(COLOR, &[GREEN]), (SIZE, &[SMALL])], false),
    ]);
    behavior.ui_mut().select(SIZE, &[SMALL]);

    let set = behavior.on_selection_changed().expect("behavior is active");

    assert_eq!(set.is_enabled(RED), Some(true));
    assert_eq!(set.is_enabled(BLUE), Some(false));
    assert_eq!(
        set.get(GREEN).and_then(|a| a.reason()),
        Some(DisabledReason::OutOfStock)
    );
    // Re-picking within Size ignores the current Size choice.
    assert_eq!(set.is_enabled(MEDIUM), Some(true));
}

#[test]
fn empty_combination_list_disables_every_value() {
    let mut behavior = behavior_with(Vec::new());

    let set = behavior.on_selection_changed().expect("behavior is active");

    assert_eq!(set.len(), 6);
    assert!(
        set.iter()
            .all(|(_, a)| a.reason() == Some(DisabledReason::NoCombinationData))
    );
}

#[tokio::test]
async fn fetch_failure_disables_everything_and_still_reports() {
    let processed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&processed);
    let mut behavior = CombinationsBehavior::new(BehaviorSettings::new(), product_ui())
        .with_on_processed(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    behavior.init();

    let failing = FnCombinationSource::new(|| async {
        Err(FetchError::Network("connection refused".into()))
    });
    assert_eq!(behavior.load_combinations(&failing).await, LoadOutcome::Failed);
    assert_eq!(behavior.load_state(), LoadState::Failed);
    assert_eq!(processed.load(Ordering::SeqCst), 0);

    let set = behavior.on_selection_changed().expect("behavior is active");
    assert_eq!(set.enabled().count(), 0);
    assert_eq!(processed.load(Ordering::SeqCst), 1);

    behavior.on_selection_changed();
    assert_eq!(processed.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn successful_load_recomputes_immediately() {
    let processed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&processed);
    let source = StaticCombinationSource::new(vec![combination(
        &[(COLOR, &[RED]), (SIZE, &[SMALL])],
        true,
    )]);

    let mut behavior = CombinationsBehavior::new(BehaviorSettings::new(), product_ui())
        .with_on_processed(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    behavior.init();
    assert_eq!(
        behavior.load_combinations(&source).await,
        LoadOutcome::Loaded {
            count: 1,
            recomputed: true
        }
    );
    assert_eq!(processed.load(Ordering::SeqCst), 1);
    assert_eq!(behavior.ui().is_enabled(BLUE), Some(false));
}

#[tokio::test]
async fn start_with_empty_list_counts_as_loaded() {
    let mut behavior = CombinationsBehavior::start(
        BehaviorSettings::new(),
        product_ui(),
        &StaticCombinationSource::default(),
    )
    .await;

    assert_eq!(behavior.load_state(), LoadState::Loaded);
    assert!(behavior.combinations().is_empty());
    assert_eq!(behavior.ui().is_enabled(RED), Some(false));
    assert_eq!(
        behavior.on_selection_changed().map(|set| set.enabled().count()),
        Some(0)
    );
}
