//! Bounded-channel stats outbox with a background worker.
//!
//! `publish` never waits: a full buffer drops the event and reports
//! [`StatsOutboxError::Full`]. The worker re-enters the publisher's trace
//! scope so its log lines correlate with the originating request.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::ports::{StatsCommand, StatsOutbox, StatsOutboxError};
use crate::domain::{StatsEvent, TraceId};

#[derive(Debug)]
struct Envelope {
    event: StatsEvent,
    trace_id: Option<TraceId>,
}

/// Publisher half of the channel outbox.
#[derive(Clone)]
pub struct ChannelStatsOutbox {
    sender: mpsc::Sender<Envelope>,
}

/// Consumer half; owns the receiver and applies events in order.
pub struct StatsWorker {
    receiver: mpsc::Receiver<Envelope>,
    command: Arc<dyn StatsCommand>,
}

impl ChannelStatsOutbox {
    /// Create a connected outbox and worker. A zero capacity is raised to one.
    pub fn new(command: Arc<dyn StatsCommand>, capacity: usize) -> (Self, StatsWorker) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, StatsWorker { receiver, command })
    }

    /// Create the outbox and spawn its worker on the current runtime.
    pub fn spawn(command: Arc<dyn StatsCommand>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (outbox, worker) = Self::new(command, capacity);
        (outbox, tokio::spawn(worker.run()))
    }
}

impl StatsWorker {
    /// Drain events until every publisher has been dropped.
    pub async fn run(mut self) {
        while let Some(Envelope { event, trace_id }) = self.receiver.recv().await {
            let command = Arc::clone(&self.command);
            let work = async move { apply_event(command.as_ref(), &event).await };
            match trace_id {
                Some(id) => TraceId::scope(id, work).await,
                None => work.await,
            }
        }
        debug!("stats worker stopped");
    }
}

async fn apply_event(command: &dyn StatsCommand, event: &StatsEvent) {
    if let Err(error) = command.apply(event).await {
        warn!(%error, ?event, "stats event could not be applied");
    }
}

#[async_trait]
impl StatsOutbox for ChannelStatsOutbox {
    async fn publish(&self, event: StatsEvent) -> Result<(), StatsOutboxError> {
        let envelope = Envelope {
            event,
            trace_id: TraceId::current(),
        };
        self.sender.try_send(envelope).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => StatsOutboxError::full(),
            mpsc::error::TrySendError::Closed(_) => StatsOutboxError::closed(),
        })
    }
}
