//! Lifecycle tests: scoping, inert behaviors, single fetch, disposal, sharing.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use common::{BLUE, COLOR, RED, SIZE, SMALL, combination, product_ui};
use variant_engine::{
    AttributeLayout, BehaviorSettings, CombinationsBehavior, ContentScope, FnCombinationSource,
    LoadOutcome, LoadState, ProductLayout, SharedBehavior, StaticCombinationSource,
    StaticSelection, ValueLayout,
};
use variant_model::{AttributeId, Combination, ValueId};

fn red_small() -> Vec<Combination> {
    vec![combination(&[(COLOR, &[RED]), (SIZE, &[SMALL])], true)]
}

#[tokio::test]
async fn behavior_without_attributes_stays_inert() {
    let settings = BehaviorSettings::new().with_content_scope(ContentScope::element("sidebar"));
    let mut behavior = CombinationsBehavior::new(settings, product_ui());

    assert!(!behavior.init());
    let outcome = behavior
        .load_combinations(&StaticCombinationSource::new(red_small()))
        .await;

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            count: 1,
            recomputed: false
        }
    );
    assert_eq!(behavior.on_selection_changed(), None);
    assert_eq!(behavior.ui().is_enabled(BLUE), Some(true));
}

#[test]
fn scope_limits_attributes_and_values() {
    let layout = ProductLayout::new(vec![
        AttributeLayout::new(COLOR, "Color", vec![ValueLayout::new(RED, "Red")])
            .in_container("product-7"),
        AttributeLayout::new(
            AttributeId::new(5),
            "Engraving",
            vec![ValueLayout::new(ValueId::new(50), "Yes")],
        )
        .in_container("product-8"),
    ]);
    let settings = BehaviorSettings::new().with_content_scope(ContentScope::element("product-7"));
    let mut behavior = CombinationsBehavior::new(settings, StaticSelection::new(layout));
    assert!(behavior.init());
    assert_eq!(behavior.attribute_ids(), &[COLOR]);

    behavior.begin_load();
    behavior.apply_fetch_result(Ok(Vec::new()));
    let set = behavior.on_selection_changed().expect("behavior is active");

    assert_eq!(set.len(), 1);
    assert_eq!(behavior.ui().is_enabled(ValueId::new(50)), Some(true));
}

#[tokio::test]
async fn second_fetch_is_refused() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fetches);
    let source = FnCombinationSource::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(red_small()) }
    });
    let mut behavior = CombinationsBehavior::new(BehaviorSettings::new(), product_ui());
    behavior.init();

    behavior.load_combinations(&source).await;
    let again = behavior.load_combinations(&source).await;

    assert_eq!(again, LoadOutcome::AlreadyRequested);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn result_arriving_after_disposal_is_ignored() {
    let mut behavior = CombinationsBehavior::new(BehaviorSettings::new(), product_ui());
    behavior.init();
    let handle = behavior.dispose_handle();
    let source = FnCombinationSource::new(move || {
        let handle = handle.clone();
        async move {
            handle.dispose();
            Ok(red_small())
        }
    });

    let outcome = behavior.load_combinations(&source).await;

    assert_eq!(outcome, LoadOutcome::Ignored);
    assert!(behavior.combinations().is_empty());
    assert_eq!(behavior.load_state(), LoadState::InFlight);
    assert_eq!(behavior.on_selection_changed(), None);
    assert_eq!(behavior.ui().is_enabled(BLUE), Some(true));
}

#[tokio::test]
async fn disposed_behavior_does_not_fetch() {
    let mut behavior = CombinationsBehavior::new(BehaviorSettings::new(), product_ui());
    behavior.init();
    behavior.dispose();

    let outcome = behavior
        .load_combinations(&StaticCombinationSource::new(red_small()))
        .await;

    assert_eq!(outcome, LoadOutcome::Ignored);
    assert_eq!(behavior.load_state(), LoadState::NotStarted);
}

#[test]
fn recomputation_is_idempotent() {
    let mut behavior = CombinationsBehavior::new(BehaviorSettings::new(), product_ui());
    behavior.init();
    behavior.begin_load();
    behavior.apply_fetch_result(Ok(red_small()));
    behavior.ui_mut().select(COLOR, &[RED]);

    let first = behavior.on_selection_changed();
    let second = behavior.on_selection_changed();

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn shared_behavior_loads_and_recomputes() {
    let mut behavior = CombinationsBehavior::new(BehaviorSettings::new(), product_ui());
    behavior.init();
    let shared = SharedBehavior::new(behavior);

    let outcome = shared
        .load_combinations(&StaticCombinationSource::new(red_small()))
        .await;
    assert!(matches!(outcome, LoadOutcome::Loaded { count: 1, .. }));

    shared.with(|behavior| behavior.ui_mut().select(COLOR, &[RED]));
    let set = shared
        .notify_selection_changed()
        .expect("no other thread is recomputing");
    assert_eq!(set.is_enabled(SMALL), Some(true));
}

#[test]
fn shared_behavior_coalesces_triggers_raised_while_busy() {
    let processed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&processed);
    let mut behavior = CombinationsBehavior::new(BehaviorSettings::new(), product_ui())
        .with_on_processed(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    behavior.init();
    behavior.begin_load();
    behavior.apply_fetch_result(Ok(red_small()));
    let baseline = processed.load(Ordering::SeqCst);
    let shared = SharedBehavior::new(behavior);

    shared.with(|_| {
        for _ in 0..3 {
            let other = shared.clone();
            let result = std::thread::spawn(move || other.notify_selection_changed())
                .join()
                .expect("notifier thread");
            assert!(result.is_none(), "busy behavior must defer the recompute");
        }
    });

    assert_eq!(processed.load(Ordering::SeqCst), baseline + 1);
}

#[tokio::test]
async fn shared_behavior_replays_trigger_raised_during_load() {
    let mut behavior = CombinationsBehavior::new(BehaviorSettings::new(), product_ui());
    behavior.init();
    let shared = SharedBehavior::new(behavior);
    let processed = Arc::new(AtomicUsize::new(0));
    let notified = Arc::new(AtomicBool::new(false));
    {
        let other = shared.clone();
        let processed = Arc::clone(&processed);
        let notified = Arc::clone(&notified);
        shared.with(move |behavior| {
            behavior.set_on_processed(move |_| {
                processed.fetch_add(1, Ordering::SeqCst);
                if !notified.swap(true, Ordering::SeqCst) {
                    let other = other.clone();
                    let result = std::thread::spawn(move || other.notify_selection_changed())
                        .join()
                        .expect("notifier thread");
                    assert!(result.is_none(), "load holds the behavior");
                }
            });
        });
    }

    let outcome = shared
        .load_combinations(&StaticCombinationSource::new(red_small()))
        .await;

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            count: 1,
            recomputed: true
        }
    );
    assert!(notified.load(Ordering::SeqCst));
    assert_eq!(processed.load(Ordering::SeqCst), 2);
    // Drop the hook so it releases its clone of the shared behavior.
    shared.with(|behavior| behavior.set_on_processed(|_| {}));
}

#[test]
fn shared_behavior_never_loses_trigger_to_refused_load() {
    for _ in 0..200 {
        let processed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&processed);
        let mut behavior = CombinationsBehavior::new(BehaviorSettings::new(), product_ui())
            .with_on_processed(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        behavior.init();
        behavior.begin_load();
        behavior.apply_fetch_result(Ok(red_small()));
        let shared = SharedBehavior::new(behavior);
        let stop = Arc::new(AtomicBool::new(false));

        let loader = {
            let shared = shared.clone();
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .expect("runtime");
                let source = StaticCombinationSource::default();
                while !stop.load(Ordering::SeqCst) {
                    let outcome = runtime.block_on(shared.load_combinations(&source));
                    assert_eq!(outcome, LoadOutcome::AlreadyRequested);
                }
            })
        };

        let before = processed.load(Ordering::SeqCst);
        shared.notify_selection_changed();
        stop.store(true, Ordering::SeqCst);
        loader.join().expect("loader thread");

        assert_eq!(processed.load(Ordering::SeqCst), before + 1);
    }
}
