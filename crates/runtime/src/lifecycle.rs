use std::fmt;

use tracing::{debug, error, info};

/// Load state of data that arrives once, asynchronously, after startup.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Ready(T),
    Failed(String),
}

/// Transition delivered to observers.
#[derive(Debug, PartialEq)]
pub enum LifecycleEvent<'a, T> {
    Ready(&'a T),
    Failed(&'a str),
}

type Observer<T> = Box<dyn FnMut(&LifecycleEvent<'_, T>)>;

/// Two-phase lifecycle: `Pending` until the first `resolve` or `fail`.
///
/// Only the first transition takes effect; later ones return `false` and
/// leave the state and observers untouched.
pub struct DataLifecycle<T> {
    state: LoadState<T>,
    observers: Vec<Observer<T>>,
}

impl<T> DataLifecycle<T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Pending,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for the (single) transition out of `Pending`.
    pub fn subscribe(&mut self, observer: impl FnMut(&LifecycleEvent<'_, T>) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn resolve(&mut self, data: T) -> bool {
        if !self.is_pending() {
            debug!("ignoring resolve; lifecycle already settled");
            return false;
        }
        self.state = LoadState::Ready(data);
        info!("data ready");
        self.notify();
        true
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> bool {
        if !self.is_pending() {
            debug!("ignoring failure; lifecycle already settled");
            return false;
        }
        let reason = reason.into();
        error!(%reason, "data failed to load");
        self.state = LoadState::Failed(reason);
        self.notify();
        true
    }

    fn notify(&mut self) {
        let event = match &self.state {
            LoadState::Ready(data) => LifecycleEvent::Ready(data),
            LoadState::Failed(reason) => LifecycleEvent::Failed(reason.as_str()),
            LoadState::Pending => return,
        };
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, LoadState::Pending)
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl<T> Default for DataLifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DataLifecycle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataLifecycle")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}
