use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use joluv::error::AppError;
use joluv::fetch::{FetchController, FetchState, LoadOutcome};
use tokio::time::sleep;

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let controller = Arc::new(FetchController::<Vec<&'static str>>::new("search"));

    let slow = {
        let c = controller.clone();
        tokio::spawn(async move {
            c.load(async {
                sleep(Duration::from_millis(200)).await;
                Ok(vec!["old"])
            })
            .await
        })
    };
    sleep(Duration::from_millis(20)).await;
    let fast = controller.load(async { Ok(vec!["new"]) }).await;

    assert_eq!(fast, LoadOutcome::Applied);
    assert_eq!(slow.await.unwrap(), LoadOutcome::Superseded);
    assert_eq!(controller.state(), FetchState::Ready(vec!["new"]));
}

#[tokio::test]
async fn test_debounce_skips_superseded_requests() {
    let controller = Arc::new(FetchController::<u32>::with_debounce(
        "search",
        Duration::from_millis(100),
    ));
    let sent = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for value in 1..=3u32 {
        let c = controller.clone();
        let sent = sent.clone();
        handles.push(tokio::spawn(async move {
            c.load(async move {
                sent.fetch_add(1, Ordering::SeqCst);
                Ok(value)
            })
            .await
        }));
        sleep(Duration::from_millis(10)).await;
    }

    let mut outcomes = Vec::new();
    for h in handles {
        outcomes.push(h.await.unwrap());
    }

    assert_eq!(
        outcomes,
        vec![LoadOutcome::Superseded, LoadOutcome::Superseded, LoadOutcome::Applied]
    );
    assert_eq!(sent.load(Ordering::SeqCst), 1);
    assert_eq!(controller.data(), Some(3));
}

#[tokio::test]
async fn test_failure_replaces_previous_results() {
    let controller = FetchController::<Vec<u32>>::new("search");
    controller.load(async { Ok(vec![1, 2, 3]) }).await;
    assert_eq!(controller.data(), Some(vec![1, 2, 3]));

    controller
        .load(async { Err::<Vec<u32>, _>(AppError::Network("connection refused".to_string())) })
        .await;

    let state = controller.state();
    assert!(state.data().is_none());
    assert!(state.error().unwrap().contains("Could not reach the server"));
}

#[tokio::test]
async fn test_loading_state_is_visible_while_in_flight() {
    let controller = Arc::new(FetchController::<u32>::new("profile"));
    let mut rx = controller.subscribe();

    let c = controller.clone();
    let task = tokio::spawn(async move {
        c.load(async {
            sleep(Duration::from_millis(50)).await;
            Ok(7)
        })
        .await
    });

    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_loading());
    task.await.unwrap();
    assert_eq!(controller.data(), Some(7));
}

#[tokio::test]
async fn test_modify_only_touches_loaded_data() {
    let controller = FetchController::<Vec<u32>>::new("history");
    assert!(!controller.modify(|v| v.push(1)));
    assert_eq!(controller.state(), FetchState::Idle);

    controller.load(async { Ok(vec![1]) }).await;
    assert!(controller.modify(|v| v.push(2)));
    assert_eq!(controller.data(), Some(vec![1, 2]));
}
