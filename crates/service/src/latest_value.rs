//! Single-slot broadcast that replays the newest value to every subscriber.
//!
//! A subscriber created after a publish still observes that value first;
//! a slow subscriber skips intermediate values and only sees the newest.

use futures_util::Stream;
use futures_util::stream;
use repofeed_core::SearchResult;
use tokio::sync::watch;

/// Publishing side of a latest-value stream.
#[derive(Debug)]
pub struct Publisher<T> {
    tx: watch::Sender<Option<T>>,
}

/// Publisher of search results.
pub type ResultPublisher = Publisher<SearchResult>;

impl<T: Clone> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Publisher<T> {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the slot and wake every subscriber. Works with no subscribers.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    /// The newest published value, if any.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription { rx: self.tx.subscribe(), primed: false }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Receiving side of a latest-value stream.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: watch::Receiver<Option<T>>,
    primed: bool,
}

/// Subscription to search results.
pub type ResultSubscription = Subscription<SearchResult>;

impl<T: Clone> Subscription<T> {
    /// The newest published value, without waiting.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    /// Waits for a value this subscription has not yielded yet.
    ///
    /// The first call returns the current value immediately if one exists.
    /// Returns `None` once the publisher is gone.
    pub async fn next(&mut self) -> Option<T> {
        if !self.primed {
            self.primed = true;
            if let Some(value) = self.rx.borrow_and_update().clone() {
                return Some(value);
            }
        }
        loop {
            self.rx.changed().await.ok()?;
            if let Some(value) = self.rx.borrow_and_update().clone() {
                return Some(value);
            }
        }
    }

    /// Adapts the subscription into a `Stream`.
    pub fn into_stream(self) -> impl Stream<Item = T> {
        stream::unfold(self, |mut sub| async move { sub.next().await.map(|value| (value, sub)) })
    }
}
