//! Stats outbox adapters.
//!
//! - [`ChannelStatsOutbox`] queues events on a bounded channel drained by a
//!   background task, so request handlers never wait on counter writes.
//! - [`InlineStatsOutbox`] applies each event before `publish` returns, which
//!   keeps integration tests deterministic.

mod channel;
mod inline;

pub use channel::{ChannelStatsOutbox, StatsWorker};
pub use inline::InlineStatsOutbox;
