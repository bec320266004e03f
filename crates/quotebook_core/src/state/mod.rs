//! Event-driven feature state machines.
//!
//! # Responsibility
//! - Turn external events into operation calls and ordered state emissions.
//! - Fire success-only analytics without letting them affect state.
//!
//! # Invariants
//! - Events of one machine are handled one at a time in arrival order.
//! - Each handled event emits `Loading` then exactly one terminal state.
//! - A successful mutation chains at most one refresh, which never chains.
//! - Emission sequence numbers strictly increase per machine.

mod clients;
mod estimates;
mod machine;
mod projects;
mod settings;

pub use clients::{ClientsData, ClientsEvent, ClientsHandler};
pub use estimates::{EstimatesData, EstimatesEvent, EstimatesHandler};
pub use machine::{StateMachine, Subscription};
pub use projects::{ProjectsData, ProjectsEvent, ProjectsHandler};
pub use settings::{SettingsEvent, SettingsHandler};

use crate::analytics::AnalyticsEvent;
use crate::repo::failure::CoreResult;
use std::fmt::Debug;

/// Observable state of one feature.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Initial,
    Loading,
    Loaded(T),
    /// Failure message, verbatim.
    Error(String),
}

/// One state published to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission<T> {
    /// Strictly increasing per machine; later wins.
    pub seq: u64,
    pub state: ViewState<T>,
}

/// Successful outcome of one handled event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<D, E> {
    pub data: D,
    pub analytics: Option<AnalyticsEvent>,
    /// Event to run right after this one, used by mutations to reload.
    pub refresh: Option<E>,
}

impl<D, E> Transition<D, E> {
    pub fn loaded(data: D) -> Self {
        Self {
            data,
            analytics: None,
            refresh: None,
        }
    }

    pub fn with_analytics(mut self, event: AnalyticsEvent) -> Self {
        self.analytics = Some(event);
        self
    }

    pub fn then_refresh(mut self, event: E) -> Self {
        self.refresh = Some(event);
        self
    }
}

/// Feature-specific event handling plugged into [`StateMachine`].
pub trait FeatureHandler: Send + 'static {
    type Event: Debug + Send + 'static;
    type Data: Debug + Clone + PartialEq + Send + Sync + 'static;

    /// Feature label used in logs.
    const FEATURE: &'static str;

    /// Short event label for logs; must not include user content.
    fn event_name(event: &Self::Event) -> &'static str;

    fn handle(&mut self, event: Self::Event) -> CoreResult<Transition<Self::Data, Self::Event>>;
}
