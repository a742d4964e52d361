/*!
Web content bridge.

Web surfaces answer DOM requests from their own execution context. The walk
issues a request, hands the host a single-shot `DomResponder`, and blocks on
a latch for at most the configured timeout. A responder completed after the
wait gave up is a no-op.
*/

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::types::{AutotrackError, AutotrackResult, ElementId};

/// Default wait for a DOM snapshot.
pub const DEFAULT_BRIDGE_TIMEOUT: Duration = Duration::from_secs(2);

/// Host-side access to embedded web content.
pub trait WebBridge: Send + Sync {
  /// Ask `surface` for its DOM snapshot. Must not block: answer through
  /// `responder` from any thread, now or later.
  fn request_dom(&self, surface: ElementId, responder: DomResponder);
}

#[derive(Debug)]
enum LatchState {
  Pending,
  Done(Result<serde_json::Value, String>),
  /// The waiter gave up or already took the value.
  Closed,
}

#[derive(Debug)]
struct Latch {
  state: Mutex<LatchState>,
  ready: Condvar,
}

/// Single-shot completion handle for one DOM request.
#[derive(Debug)]
pub struct DomResponder {
  latch: Arc<Latch>,
  surface: ElementId,
}

impl DomResponder {
  /// Deliver the result. Ignored if the waiter already timed out.
  pub fn complete(self, result: Result<serde_json::Value, String>) {
    let mut state = self.latch.state.lock();
    if matches!(*state, LatchState::Pending) {
      *state = LatchState::Done(result);
      self.latch.ready.notify_one();
    } else {
      log::debug!("DomResponder: late answer for {} dropped", self.surface);
    }
  }
}

/// Request a DOM snapshot and wait up to `timeout` for it.
pub fn fetch_dom(
  bridge: &dyn WebBridge,
  surface: ElementId,
  timeout: Duration,
) -> AutotrackResult<serde_json::Value> {
  let latch = Arc::new(Latch {
    state: Mutex::new(LatchState::Pending),
    ready: Condvar::new(),
  });
  bridge.request_dom(
    surface,
    DomResponder {
      latch: Arc::clone(&latch),
      surface,
    },
  );

  let deadline = Instant::now() + timeout;
  let mut state = latch.state.lock();
  while matches!(*state, LatchState::Pending) {
    if latch.ready.wait_until(&mut state, deadline).timed_out() {
      break;
    }
  }

  match std::mem::replace(&mut *state, LatchState::Closed) {
    LatchState::Done(Ok(dom)) => Ok(dom),
    LatchState::Done(Err(reason)) => Err(AutotrackError::BridgeFailed { surface, reason }),
    LatchState::Pending | LatchState::Closed => Err(AutotrackError::BridgeTimeout {
      surface,
      waited_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
    }),
  }
}
