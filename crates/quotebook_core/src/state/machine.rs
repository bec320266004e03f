//! Single-task actor driving one [`FeatureHandler`].

use crate::analytics::{fire_and_forget, AnalyticsSink};
use crate::state::{Emission, FeatureHandler, ViewState};
use log::{debug, error, warn};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task;

const EMISSION_BUFFER: usize = 64;
const HANDLER_CRASHED: &str = "Unexpected internal error";

/// Handle to a running feature state machine.
///
/// Cloning the handle shares the same actor. The actor stops once every
/// handle is dropped and its mailbox drains.
pub struct StateMachine<H: FeatureHandler> {
    mailbox: mpsc::UnboundedSender<H::Event>,
    emissions: broadcast::Sender<Emission<H::Data>>,
    latest: watch::Receiver<Emission<H::Data>>,
}

impl<H: FeatureHandler> Clone for StateMachine<H> {
    fn clone(&self) -> Self {
        Self {
            mailbox: self.mailbox.clone(),
            emissions: self.emissions.clone(),
            latest: self.latest.clone(),
        }
    }
}

impl<H: FeatureHandler> StateMachine<H> {
    /// Starts the actor task for `handler`.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn spawn(handler: H, analytics: Arc<dyn AnalyticsSink>) -> Self {
        let (mailbox, inbox) = mpsc::unbounded_channel();
        let (emissions, _) = broadcast::channel(EMISSION_BUFFER);
        let initial = Emission {
            seq: 0,
            state: ViewState::Initial,
        };
        let (latest_tx, latest) = watch::channel(initial);

        let emitter = Emitter {
            seq: 0,
            current: ViewState::Initial,
            broadcast: emissions.clone(),
            latest: latest_tx,
        };
        tokio::spawn(run(handler, inbox, emitter, analytics));

        Self {
            mailbox,
            emissions,
            latest,
        }
    }

    /// Queues `event`. Returns `false` if the actor has stopped.
    pub fn dispatch(&self, event: H::Event) -> bool {
        self.mailbox.send(event).is_ok()
    }

    /// Subscribes to emissions produced after this call.
    pub fn subscribe(&self) -> Subscription<H::Data> {
        Subscription {
            receiver: self.emissions.subscribe(),
        }
    }

    /// Latest emitted state.
    pub fn state(&self) -> ViewState<H::Data> {
        self.latest.borrow().state.clone()
    }

    /// Sequence number of the latest emission.
    pub fn seq(&self) -> u64 {
        self.latest.borrow().seq
    }
}

/// Presentation-side stream of emissions. Drop to unsubscribe.
pub struct Subscription<T> {
    receiver: broadcast::Receiver<Emission<T>>,
}

impl<T: Clone> Subscription<T> {
    /// Next emission, or `None` once the machine has stopped.
    ///
    /// A subscriber that falls behind skips to the oldest retained emission.
    pub async fn next(&mut self) -> Option<Emission<T>> {
        loop {
            match self.receiver.recv().await {
                Ok(emission) => return Some(emission),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("event=state_lagged module=state status=error skipped={skipped}");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

struct Emitter<T> {
    seq: u64,
    current: ViewState<T>,
    broadcast: broadcast::Sender<Emission<T>>,
    latest: watch::Sender<Emission<T>>,
}

impl<T: Clone + PartialEq> Emitter<T> {
    fn emit(&mut self, state: ViewState<T>) {
        if state == self.current {
            return;
        }
        self.seq += 1;
        self.current = state.clone();
        let emission = Emission {
            seq: self.seq,
            state,
        };
        self.latest.send_replace(emission.clone());
        // No subscribers is fine; `latest` still tracks the state.
        let _ = self.broadcast.send(emission);
    }
}

async fn run<H: FeatureHandler>(
    handler: H,
    mut inbox: mpsc::UnboundedReceiver<H::Event>,
    mut emitter: Emitter<H::Data>,
    analytics: Arc<dyn AnalyticsSink>,
) {
    let handler = Arc::new(Mutex::new(handler));
    while let Some(event) = inbox.recv().await {
        if let Some(refresh) = process(&handler, event, &mut emitter, &analytics).await {
            // Chained refreshes are processed but never chain again.
            let _ = process(&handler, refresh, &mut emitter, &analytics).await;
        }
    }
    debug!("event=state_stop module=state status=ok feature={}", H::FEATURE);
}

async fn process<H: FeatureHandler>(
    handler: &Arc<Mutex<H>>,
    event: H::Event,
    emitter: &mut Emitter<H::Data>,
    analytics: &Arc<dyn AnalyticsSink>,
) -> Option<H::Event> {
    let event_name = H::event_name(&event);
    emitter.emit(ViewState::Loading);

    // Storage calls block; keep them off the async workers.
    let handler = Arc::clone(handler);
    let outcome = task::spawn_blocking(move || {
        let mut handler = handler.lock().unwrap_or_else(PoisonError::into_inner);
        handler.handle(event)
    })
    .await;

    match outcome {
        Ok(Ok(transition)) => {
            if let Some(analytics_event) = transition.analytics {
                fire_and_forget(Arc::clone(analytics), analytics_event);
            }
            emitter.emit(ViewState::Loaded(transition.data));
            debug!(
                "event=state_transition module=state status=ok feature={} trigger={}",
                H::FEATURE,
                event_name
            );
            transition.refresh
        }
        Ok(Err(failure)) => {
            warn!(
                "event=state_transition module=state status=error feature={} trigger={} kind={}",
                H::FEATURE,
                event_name,
                failure.kind.as_str()
            );
            emitter.emit(ViewState::Error(failure.message));
            None
        }
        Err(join_error) => {
            error!(
                "event=state_transition module=state status=error feature={} trigger={} error_code=handler_panicked panicked={}",
                H::FEATURE,
                event_name,
                join_error.is_panic()
            );
            emitter.emit(ViewState::Error(HANDLER_CRASHED.to_string()));
            None
        }
    }
}
