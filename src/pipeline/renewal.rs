//! Renewal wave bookkeeping.
//!
//! A "wave" starts when the first 401 of a batch is observed and ends
//! once the queue of suspended requests has been fully drained. The
//! queue is explicit so the FIFO and single-renewal invariants are
//! directly testable instead of incidental.

use std::collections::VecDeque;
use tokio::sync::oneshot;

use crate::pipeline::error::ClientError;
use crate::pipeline::request::{ApiRequest, ApiResponse};

/// A request suspended while a renewal wave is in progress: the
/// replayable request plus the channel its caller is parked on.
pub(crate) struct QueuedCall {
    pub request: ApiRequest,
    pub responder: oneshot::Sender<Result<ApiResponse, ClientError>>,
}

/// Transient wave state. Guarded by a mutex in the client; the flag is
/// only read-then-written within one synchronous stretch, never across
/// an await.
#[derive(Default)]
pub(crate) struct RenewalState {
    /// True from the first 401 of a wave until its queue is drained.
    pub in_progress: bool,
    /// Suspended requests in arrival order.
    pub queue: VecDeque<QueuedCall>,
}
