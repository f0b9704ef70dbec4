use gridstate::query::{Query, QueryError, QueryState};

#[test]
fn test_lifecycle() {
    let query: Query<i32> = Query::new();
    assert!(query.is_idle());

    let run = query.start();
    assert!(query.is_loading());

    assert!(run.finish(7));
    assert!(query.is_ready());
    assert_eq!(query.value(), Some(7));
}

#[test]
fn test_failure() {
    let query: Query<i32> = Query::new();
    let run = query.start();

    assert!(run.fail("connection refused"));
    assert!(query.is_failed());
    assert_eq!(query.value(), None);
    assert_eq!(
        query.error().map(|e| e.message),
        Some("connection refused".to_string())
    );
}

#[test]
fn test_superseded_run_is_ignored() {
    let query: Query<&'static str> = Query::new();

    let stale = query.start();
    let current = query.start();
    assert!(!stale.is_current());
    assert!(current.is_current());

    assert!(!stale.finish("old"));
    assert!(query.is_loading());

    assert!(current.finish("new"));
    assert_eq!(query.value(), Some("new"));
}

#[test]
fn test_stale_failure_does_not_clobber_result() {
    let query: Query<&'static str> = Query::new();

    let stale = query.start();
    let current = query.start();
    assert!(current.finish("new"));

    assert!(!stale.fail("timed out"));
    assert!(query.is_ready());
    assert_eq!(query.value(), Some("new"));
}

#[test]
fn test_cancel_returns_to_idle_and_orphans_the_run() {
    let query: Query<i32> = Query::new();
    let run = query.start();

    query.cancel();
    assert!(query.is_idle());

    assert!(!run.finish(7));
    assert!(query.is_idle());
}

#[test]
fn test_cancel_leaves_settled_state_alone() {
    let query: Query<i32> = Query::new();
    let run = query.start();
    assert!(run.finish(7));

    query.cancel();
    assert!(query.is_ready());
    assert_eq!(query.value(), Some(7));
}

#[test]
fn test_state_map() {
    let state: QueryState<i32> = QueryState::Ready(21);
    let doubled = state.map(|v| v * 2);
    assert_eq!(doubled.as_ready(), Some(&42));

    let failed: QueryState<i32> = QueryState::Failed(QueryError::new("nope"));
    assert!(failed.map(|v| v * 2).is_failed());
}

#[test]
fn test_dirty_tracking() {
    let query: Query<i32> = Query::new();
    assert!(!query.is_dirty());

    let run = query.start();
    assert!(query.is_dirty());
    query.clear_dirty();

    assert!(run.finish(1));
    assert!(query.is_dirty());
}

#[tokio::test]
async fn test_finishes_across_tasks() {
    let query: Query<i32> = Query::new();
    let run = query.start();

    let handle = tokio::spawn(async move { run.finish(7) });
    assert!(handle.await.expect("task panicked"));
    assert_eq!(query.value(), Some(7));
}

#[tokio::test]
async fn test_newer_run_wins_across_tasks() {
    let query: Query<&'static str> = Query::new();

    let slow = query.start();
    let fast = query.start();

    let fast_handle = tokio::spawn(async move { fast.finish("fast") });
    assert!(fast_handle.await.expect("task panicked"));

    let slow_handle = tokio::spawn(async move { slow.finish("slow") });
    assert!(!slow_handle.await.expect("task panicked"));

    assert_eq!(query.value(), Some("fast"));
}
