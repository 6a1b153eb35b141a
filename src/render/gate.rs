use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, warn};

use crate::error::FetchError;
use crate::feed::{FeedSource, Post, load_posts};

pub const LOAD_FAILED_MESSAGE: &str =
  "Failed to load blog posts. Please try again later.";
pub const EMPTY_MESSAGE: &str = "No posts found";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
  Loading,
  Error,
  Empty,
  Populated(Vec<Post>),
}

impl ViewState {
  pub fn name(&self) -> &'static str {
    match self {
      ViewState::Loading => "loading",
      ViewState::Error => "error",
      ViewState::Empty => "empty",
      ViewState::Populated(_) => "populated",
    }
  }

  pub fn posts(&self) -> &[Post] {
    match self {
      ViewState::Populated(posts) => posts,
      _ => &[],
    }
  }
}

/// Decides what a page view shows. Starts out loading and settles
/// exactly once; a page view never goes back to loading.
#[derive(Debug)]
pub struct RenderGate {
  state: ViewState,
  mounted: bool,
}

impl Default for RenderGate {
  fn default() -> Self {
    Self::new()
  }
}

impl RenderGate {
  pub fn new() -> Self {
    Self {
      state: ViewState::Loading,
      mounted: true,
    }
  }

  pub fn state(&self) -> &ViewState {
    &self.state
  }

  pub fn is_settled(&self) -> bool {
    !matches!(self.state, ViewState::Loading)
  }

  /// Apply the pipeline outcome. Returns false and changes nothing if
  /// the gate has already settled or was unmounted.
  pub fn settle(&mut self, outcome: Result<Vec<Post>, FetchError>) -> bool {
    if !self.mounted {
      debug!("discarding feed outcome for an unmounted view");
      return false;
    }

    if self.is_settled() {
      debug!("discarding feed outcome, view already {}", self.state.name());
      return false;
    }

    self.state = match outcome {
      Err(_) => ViewState::Error,
      Ok(mut posts) => {
        let before = posts.len();
        posts.retain(|p| !p.guid.is_empty());
        if posts.len() != before {
          warn!("dropped {} posts without a guid", before - posts.len());
        }

        if posts.is_empty() {
          ViewState::Empty
        } else {
          ViewState::Populated(posts)
        }
      }
    };

    true
  }

  pub fn unmount(&mut self) {
    self.mounted = false;
  }
}

/// The gate of one live page view, shared with the fetch that settles
/// it. Dropping the view unmounts the gate; a fetch still in flight runs
/// to completion and its outcome is discarded.
pub struct MountedGate {
  gate: Arc<Mutex<RenderGate>>,
}

impl Default for MountedGate {
  fn default() -> Self {
    Self::new()
  }
}

impl MountedGate {
  pub fn new() -> Self {
    Self {
      gate: Arc::new(Mutex::new(RenderGate::new())),
    }
  }

  /// Run the pipeline once against `source` and settle the gate.
  pub async fn load<S>(&self, source: S)
  where
    S: FeedSource + Send + Sync + 'static,
  {
    let gate = self.gate.clone();
    let task = tokio::spawn(async move {
      let outcome = load_posts(&source).await;
      lock(&gate).settle(outcome);
    });

    if let Err(e) = task.await {
      error!("feed task failed: {e}");
      self.settle(Err(FetchError::Transport(e.to_string())));
    }
  }

  pub fn settle(&self, outcome: Result<Vec<Post>, FetchError>) -> bool {
    lock(&self.gate).settle(outcome)
  }

  pub fn state(&self) -> ViewState {
    lock(&self.gate).state().clone()
  }
}

impl Drop for MountedGate {
  fn drop(&mut self) {
    lock(&self.gate).unmount();
  }
}

fn lock(gate: &Mutex<RenderGate>) -> MutexGuard<'_, RenderGate> {
  gate.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use tokio::sync::Notify;

  use super::*;
  use crate::feed::FeedPayload;
  use crate::test_utils::StubSource;

  async fn load(source: &StubSource) -> ViewState {
    let view = MountedGate::new();
    view.load(source.clone()).await;
    view.state()
  }

  /// Holds the fetch until released.
  struct HeldSource {
    release: Arc<Notify>,
    inner: StubSource,
  }

  #[async_trait::async_trait]
  impl FeedSource for HeldSource {
    async fn fetch(&self) -> Result<FeedPayload, FetchError> {
      self.release.notified().await;
      self.inner.fetch().await
    }
  }

  #[tokio::test]
  async fn empty_items_settle_to_empty() {
    assert_eq!(load(&StubSource::ok(json!([]))).await, ViewState::Empty);
  }

  #[tokio::test]
  async fn failures_settle_to_the_same_error() {
    let transport =
      StubSource::failing(FetchError::Transport("connection reset".into()));
    let format = StubSource::failing(
      FeedPayload::from_json(r#"{"status":"error"}"#).unwrap_err(),
    );

    let a = load(&transport).await;
    let b = load(&format).await;
    assert_eq!(a, ViewState::Error);
    assert_eq!(a, b);
    assert!(a.posts().is_empty());
  }

  #[tokio::test]
  async fn posts_settle_to_populated() {
    let source = StubSource::ok(json!([
      {"title": "A", "link": "http://x", "guid": "g1",
       "pubDate": "2024-01-01",
       "description": "<img src='i.png'>hello world"}
    ]));
    let state = load(&source).await;

    assert_eq!(state.name(), "populated");
    assert_eq!(state.posts()[0].guid, "g1");
    assert_eq!(source.calls(), 1);
  }

  #[tokio::test]
  async fn fetch_finishing_after_teardown_is_discarded() {
    let release = Arc::new(Notify::new());
    let stub = StubSource::ok(json!([{"guid": "g1", "title": "A"}]));
    let source = HeldSource {
      release: release.clone(),
      inner: stub.clone(),
    };

    let view = MountedGate::new();
    let shared = view.gate.clone();
    {
      // the request goes away while the fetch is pending
      let load = view.load(source);
      tokio::select! {
        _ = load => panic!("fetch was released early"),
        _ = tokio::task::yield_now() => {}
      }
    }
    drop(view);

    release.notify_one();
    while Arc::strong_count(&shared) > 1 {
      tokio::task::yield_now().await;
    }

    assert_eq!(stub.calls(), 1);
    assert_eq!(lock(&shared).state(), &ViewState::Loading);
  }

  #[test]
  fn poisoned_gate_is_still_usable() {
    let gate = Arc::new(Mutex::new(RenderGate::new()));
    let held = gate.clone();
    let _ = std::thread::spawn(move || {
      let _guard = held.lock().unwrap();
      panic!("poisoned while settling");
    })
    .join();

    assert!(gate.is_poisoned());
    assert!(lock(&gate).settle(Ok(vec![])));
    assert_eq!(lock(&gate).state(), &ViewState::Empty);
  }

  #[test]
  fn dropping_the_view_unmounts_the_gate() {
    let view = MountedGate::new();
    let shared = view.gate.clone();
    drop(view);
    assert!(!lock(&shared).settle(Ok(vec![])));
  }

  #[test]
  fn settles_only_once() {
    let mut gate = RenderGate::new();
    assert!(!gate.is_settled());
    assert!(gate.settle(Ok(vec![])));
    assert!(!gate.settle(Err(FetchError::Format("late".into()))));
    assert_eq!(gate.state(), &ViewState::Empty);
  }

  #[test]
  fn outcome_after_unmount_is_discarded() {
    let mut gate = RenderGate::new();
    gate.unmount();
    assert!(!gate.settle(Ok(vec![])));
    assert_eq!(gate.state(), &ViewState::Loading);
  }

  #[test]
  fn posts_without_guid_are_not_rendered() {
    let mut post = crate::test_utils::post("g1");
    post.guid.clear();

    let mut gate = RenderGate::new();
    gate.settle(Ok(vec![post]));
    assert_eq!(gate.state(), &ViewState::Empty);
  }
}
