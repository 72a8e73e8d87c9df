use super::store::CandidateStore;
use ferrous_pathstore_application::ports::{Admission, PathStoreStats};
use ferrous_pathstore_domain::{DomainError, IsdAs, PathSegment, SegmentId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Requests a store worker serves, one at a time, in arrival order.
pub(crate) enum StoreCommand<S: PathSegment> {
    Add {
        segment: S,
        reply: oneshot::Sender<Admission>,
    },
    Remove {
        ids: Vec<SegmentId>,
        reply: oneshot::Sender<usize>,
    },
    Best {
        k: Option<usize>,
        mark_sent: bool,
        reply: oneshot::Sender<Vec<Arc<S>>>,
    },
    History {
        k: Option<usize>,
        reply: oneshot::Sender<Vec<Arc<S>>>,
    },
    Get {
        id: SegmentId,
        reply: oneshot::Sender<Option<Arc<S>>>,
    },
    Expire {
        reply: oneshot::Sender<ExpirySummary>,
    },
    Stats {
        reply: oneshot::Sender<PathStoreStats>,
    },
}

/// What one expiry sweep did to one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirySummary {
    pub expired: usize,
    pub live: usize,
}

/// Task that owns one destination's [`CandidateStore`].
pub struct PathStoreWorker<S: PathSegment> {
    destination: IsdAs,
    store: CandidateStore<S>,
    occupancy: Arc<AtomicUsize>,
}

impl<S: PathSegment> PathStoreWorker<S> {
    pub fn new(destination: IsdAs, store: CandidateStore<S>) -> Self {
        Self {
            destination,
            store,
            occupancy: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Spawns the worker on the current runtime and returns its handle.
    pub fn spawn(self, queue_depth: usize) -> PathStoreHandle<S> {
        let (sender, receiver) = mpsc::channel(queue_depth.max(1));
        let destination = self.destination;
        let occupancy = self.occupancy.clone();
        tokio::spawn(self.run(receiver));
        PathStoreHandle {
            destination,
            sender,
            occupancy,
        }
    }

    async fn run(mut self, mut receiver: mpsc::Receiver<StoreCommand<S>>) {
        debug!(destination = %self.destination, "PathStoreWorker: started");

        let mut handled = 0u64;
        while let Some(command) = receiver.recv().await {
            self.handle(command);
            handled += 1;
        }

        debug!(
            destination = %self.destination,
            handled,
            "PathStoreWorker: channel closed, shutting down"
        );
    }

    fn handle(&mut self, command: StoreCommand<S>) {
        // A dropped reply receiver means the caller gave up; nothing to do.
        // Commands that change the candidate count publish it before replying.
        match command {
            StoreCommand::Add { segment, reply } => {
                let admission = self.store.add_segment(segment);
                self.publish_occupancy();
                let _ = reply.send(admission);
            }
            StoreCommand::Remove { ids, reply } => {
                let removed = self.store.remove_segments(&ids);
                self.publish_occupancy();
                let _ = reply.send(removed);
            }
            StoreCommand::Best {
                k,
                mark_sent,
                reply,
            } => {
                let _ = reply.send(self.store.get_best_segments(k, mark_sent));
            }
            StoreCommand::History { k, reply } => {
                let _ = reply.send(self.store.get_latest_history_snapshot(k));
            }
            StoreCommand::Get { id, reply } => {
                let _ = reply.send(self.store.get_segment(&id));
            }
            StoreCommand::Expire { reply } => {
                let expired = self.store.expire();
                self.publish_occupancy();
                let _ = reply.send(ExpirySummary {
                    expired,
                    live: self.store.len(),
                });
            }
            StoreCommand::Stats { reply } => {
                let _ = reply.send(self.store.stats());
            }
        }
    }

    fn publish_occupancy(&self) {
        self.occupancy.store(self.store.len(), Ordering::Release);
    }
}

/// Cloneable sender side of a [`PathStoreWorker`].
pub struct PathStoreHandle<S: PathSegment> {
    destination: IsdAs,
    sender: mpsc::Sender<StoreCommand<S>>,
    occupancy: Arc<AtomicUsize>,
}

impl<S: PathSegment> Clone for PathStoreHandle<S> {
    fn clone(&self) -> Self {
        Self {
            destination: self.destination,
            sender: self.sender.clone(),
            occupancy: self.occupancy.clone(),
        }
    }
}

impl<S: PathSegment> PathStoreHandle<S> {
    pub fn destination(&self) -> IsdAs {
        self.destination
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// True when the worker is gone, or when this is the last handle and the
    /// store holds no candidates.
    ///
    /// Handles live until their request is answered, so with no other handle
    /// around every issued command has already updated the count.
    pub(crate) fn is_reapable(&self) -> bool {
        if self.is_closed() {
            return true;
        }
        // One reference for the worker, one for this handle.
        Arc::strong_count(&self.occupancy) == 2 && self.occupancy.load(Ordering::Acquire) == 0
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> StoreCommand<S>,
    ) -> Result<T, DomainError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(build(reply))
            .await
            .map_err(|_| self.unavailable())?;
        response.await.map_err(|_| self.unavailable())
    }

    fn unavailable(&self) -> DomainError {
        DomainError::StoreUnavailable(self.destination.to_string())
    }

    pub async fn add_segment(&self, segment: S) -> Result<Admission, DomainError> {
        self.request(|reply| StoreCommand::Add { segment, reply })
            .await
    }

    pub async fn remove_segments(&self, ids: Vec<SegmentId>) -> Result<usize, DomainError> {
        self.request(|reply| StoreCommand::Remove { ids, reply })
            .await
    }

    pub async fn get_best_segments(
        &self,
        k: Option<usize>,
        mark_sent: bool,
    ) -> Result<Vec<Arc<S>>, DomainError> {
        self.request(|reply| StoreCommand::Best {
            k,
            mark_sent,
            reply,
        })
        .await
    }

    pub async fn get_latest_history_snapshot(
        &self,
        k: Option<usize>,
    ) -> Result<Vec<Arc<S>>, DomainError> {
        self.request(|reply| StoreCommand::History { k, reply })
            .await
    }

    pub async fn get_segment(&self, id: SegmentId) -> Result<Option<Arc<S>>, DomainError> {
        self.request(|reply| StoreCommand::Get { id, reply }).await
    }

    pub async fn expire(&self) -> Result<ExpirySummary, DomainError> {
        self.request(|reply| StoreCommand::Expire { reply }).await
    }

    pub async fn stats(&self) -> Result<PathStoreStats, DomainError> {
        self.request(|reply| StoreCommand::Stats { reply }).await
    }
}

impl<S: PathSegment> std::fmt::Debug for PathStoreHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathStoreHandle")
            .field("destination", &self.destination)
            .field("closed", &self.is_closed())
            .finish()
    }
}
