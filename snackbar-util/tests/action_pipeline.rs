use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use snackbar_util::{ActionDescriptor, Activation, KeepOpen, render_actions};

fn waiting_action(label: &str) -> (ActionDescriptor, tokio::sync::oneshot::Sender<()>) {
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let rx = Arc::new(Mutex::new(Some(rx)));
    let descriptor = ActionDescriptor::new_async(label, move || {
        let rx = rx.lock().unwrap().take();
        async move {
            if let Some(rx) = rx {
                let _ = rx.await;
            }
            Ok(())
        }
    })
    .keep_open(KeepOpen::UntilResolved);
    (descriptor, tx)
}

#[tokio::test]
async fn different_actions_can_be_pending_simultaneously() {
    let (first, first_tx) = waiting_action("first");
    let (second, second_tx) = waiting_action("second");

    let rendered = render_actions(&[first, second]);

    let pending_first = {
        let action = rendered[0].clone();
        tokio::spawn(async move { action.activate().await })
    };
    let pending_second = {
        let action = rendered[1].clone();
        tokio::spawn(async move { action.activate().await })
    };
    tokio::task::yield_now().await;

    // No global lock: both are pending at once, each guarding only itself
    assert!(rendered[0].is_disabled());
    assert!(rendered[1].is_disabled());

    first_tx.send(()).unwrap();
    second_tx.send(()).unwrap();
    assert_eq!(pending_first.await.unwrap(), Activation::Close);
    assert_eq!(pending_second.await.unwrap(), Activation::Close);
    assert!(!rendered[0].is_disabled());
    assert!(!rendered[1].is_disabled());
}

#[tokio::test]
async fn rerender_discards_pending_state() {
    let (descriptor, tx) = waiting_action("save");
    let descriptors = vec![descriptor];

    let rendered = render_actions(&descriptors);
    let pending = {
        let action = rendered[0].clone();
        tokio::spawn(async move { action.activate().await })
    };
    tokio::task::yield_now().await;
    assert!(rendered[0].is_disabled());

    // A fresh render of the same input starts with fresh per-action state
    let rerendered = render_actions(&descriptors);
    assert!(!rerendered[0].is_disabled());

    tx.send(()).unwrap();
    pending.await.unwrap();
}

#[tokio::test]
async fn pipeline_applies_filter_then_dedup_then_wrap() {
    let hits = Arc::new(AtomicUsize::new(0));

    let mut partial = ActionDescriptor::new("retry", || {});
    partial.execute = None;

    let hits_in = hits.clone();
    let descriptors = vec![
        // Invalid entries go first and silently: "retry" below is no duplicate
        partial,
        ActionDescriptor::new("", || {}),
        ActionDescriptor::new("retry", move || {
            hits_in.fetch_add(1, Ordering::SeqCst);
        }),
        ActionDescriptor::new("retry", || {
            panic!("the later duplicate must never execute");
        }),
    ];

    let rendered = render_actions(&descriptors);
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].label(), "retry");

    assert_eq!(rendered[0].activate().await, Activation::Close);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn keyword_round_trip_matches_policy() {
    let parsed: KeepOpen = serde_json::from_str(r#""until-resolved""#).unwrap();
    let descriptor = ActionDescriptor::new("sync", || {}).keep_open(parsed);

    let rendered = render_actions(&[descriptor]);
    assert_eq!(rendered[0].keep_open(), KeepOpen::UntilResolved);

    // Unrecognized keywords degrade to the dismissing default
    let fallback: KeepOpen = serde_json::from_str(r#""whenever""#).unwrap();
    assert_eq!(fallback, KeepOpen::Never);
}
