//! Live feed behind `GET .../live`.
//!
//! One task per open stream runs three independent timers. Each tick
//! re-reads the store and pushes a named Server-Sent Event:
//!
//! - `profiles` (discovery list and sent likes)
//! - `messages` (new messages and received contact shares)
//! - `notification` (oldest unseen match, latest unread message)
//!
//! A failed refresh is logged and skipped; the next tick tries again. The
//! task exits as soon as the client goes away. A match notice is marked
//! seen only after the connection has taken the event carrying it.

use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;

use axum::response::sse::Event;
use chrono::{DateTime, Duration, Utc};
use domain::models::{MatchSide, Message, SessionContext};
use futures_util::Stream;
use serde::Serialize;
use sqlx::PgPool;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::PollingConfig;
use crate::error::ApiError;
use crate::middleware::metrics::record_live_streams;
use crate::services::feed;

/// Events buffered per stream before the task waits on the client.
const CHANNEL_CAPACITY: usize = 8;

/// How far each messages query reaches behind the newest message seen.
/// Must exceed the longest gap between a message row's timestamp and its
/// commit.
const MESSAGE_OVERLAP_SECS: i64 = 60;

type Acknowledgements = Vec<(Uuid, MatchSide)>;

/// An encoded event and the match rows to mark seen once it is delivered.
#[derive(Debug)]
struct FeedItem {
    event: Event,
    acknowledgements: Acknowledgements,
}

impl From<Event> for FeedItem {
    fn from(event: Event) -> Self {
        Self {
            event,
            acknowledgements: Vec::new(),
        }
    }
}

/// Starts the refresh task and returns the stream it feeds.
pub fn spawn_live_feed(
    pool: PgPool,
    ctx: SessionContext,
    polling: PollingConfig,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    tokio::spawn(run(pool.clone(), ctx.clone(), polling, tx));

    receiver_stream(rx, move |acknowledgements| {
        let pool = pool.clone();
        let ctx = ctx.clone();
        async move { feed::acknowledge(&pool, &ctx, &acknowledgements).await }
    })
}

/// Yields queued events. An item's acknowledgements run when the stream is
/// polled again, which only happens once the previous event was taken.
fn receiver_stream<A, F>(
    rx: mpsc::Receiver<FeedItem>,
    acknowledge: A,
) -> impl Stream<Item = Result<Event, Infallible>>
where
    A: FnMut(Acknowledgements) -> F,
    F: Future<Output = ()>,
{
    futures_util::stream::unfold(
        (rx, acknowledge, Acknowledgements::new()),
        |(mut rx, mut acknowledge, delivered)| async move {
            if !delivered.is_empty() {
                acknowledge(delivered).await;
            }
            let item = rx.recv().await?;
            Some((Ok(item.event), (rx, acknowledge, item.acknowledgements)))
        },
    )
}

/// Tracks which messages the stream already sent.
///
/// Queries start [`MESSAGE_OVERLAP_SECS`] before the newest timestamp seen,
/// so a row that commits late with an older timestamp is still picked up.
/// Ids seen inside that window are remembered and not sent twice.
#[derive(Debug)]
struct MessageCursor {
    newest: DateTime<Utc>,
    seen: HashMap<Uuid, DateTime<Utc>>,
}

impl MessageCursor {
    fn new() -> Self {
        Self {
            newest: DateTime::<Utc>::UNIX_EPOCH,
            seen: HashMap::new(),
        }
    }

    fn query_from(&self) -> DateTime<Utc> {
        self.newest - Duration::seconds(MESSAGE_OVERLAP_SECS)
    }

    /// Keeps the messages not sent before and records them as sent.
    fn accept(&mut self, messages: Vec<Message>) -> Vec<Message> {
        let fresh: Vec<Message> = messages
            .into_iter()
            .filter(|m| !self.seen.contains_key(&m.id))
            .collect();

        for message in &fresh {
            self.seen.insert(message.id, message.created_at);
            if message.created_at > self.newest {
                self.newest = message.created_at;
            }
        }

        let horizon = self.query_from();
        self.seen.retain(|_, created_at| *created_at > horizon);
        fresh
    }
}

async fn run(pool: PgPool, ctx: SessionContext, polling: PollingConfig, tx: mpsc::Sender<FeedItem>) {
    record_live_streams(1.0);
    debug!(event_id = %ctx.event_id, session_id = %ctx.session_id, "Live feed opened");

    let mut profiles = interval(polling.profiles_interval());
    let mut messages = interval(polling.messages_interval());
    let mut notifications = interval(polling.notifications_interval());
    for timer in [&mut profiles, &mut messages, &mut notifications] {
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    }

    // First messages tick sends the whole history, later ones only deltas.
    let mut cursor = MessageCursor::new();

    loop {
        let refreshed = tokio::select! {
            _ = tx.closed() => break,
            _ = profiles.tick() => {
                refresh("profiles", feed::load_profiles(&pool, &ctx).await).map(FeedItem::from)
            }
            _ = messages.tick() => {
                let snapshot = feed::load_messages(&pool, &ctx, cursor.query_from())
                    .await
                    .map(|mut snapshot| {
                        snapshot.messages = cursor.accept(snapshot.messages);
                        snapshot
                    });
                refresh("messages", snapshot).map(FeedItem::from)
            }
            _ = notifications.tick() => {
                feed::load_notifications(&pool, &ctx).await.and_then(|pending| {
                    Ok(FeedItem {
                        event: refresh("notification", Ok(pending.response))?,
                        acknowledgements: pending.acknowledgements,
                    })
                })
            }
        };

        match refreshed {
            Ok(item) => {
                if tx.send(item).await.is_err() {
                    break;
                }
            }
            Err(e) => warn!(
                event_id = %ctx.event_id,
                session_id = %ctx.session_id,
                error = %e,
                "Live feed refresh failed"
            ),
        }
    }

    record_live_streams(-1.0);
    debug!(event_id = %ctx.event_id, session_id = %ctx.session_id, "Live feed closed");
}

fn refresh<T: Serialize>(name: &str, loaded: Result<T, ApiError>) -> Result<Event, ApiError> {
    let payload = loaded?;
    Event::default()
        .event(name)
        .json_data(&payload)
        .map_err(|e| ApiError::Internal(format!("Failed to encode {} event: {}", name, e)))
}
