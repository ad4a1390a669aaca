//! Configuration change notifications.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use super::LanguageServerConfiguration;

/// Something that happened to a [`LanguageServerConfiguration`].
#[derive(Clone, Copy, Debug)]
pub enum ConfigurationEvent<'a> {
    /// The backing file was (re)assigned; fired before values change.
    FileChanged(&'a Path),
    /// Values were replaced; fired after the new values are visible.
    Changed(&'a LanguageServerConfiguration),
}

/// Receives [`ConfigurationEvent`]s.
///
/// Implemented for every `Fn(&ConfigurationEvent)` closure.
pub trait ConfigurationObserver: Send + Sync {
    fn on_event(&self, event: &ConfigurationEvent<'_>);
}

impl<F> ConfigurationObserver for F
where
    F: Fn(&ConfigurationEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &ConfigurationEvent<'_>) {
        self(event)
    }
}

/// Subscribers of one configuration handle.
#[derive(Default)]
pub(super) struct Observers {
    observers: RwLock<Vec<Arc<dyn ConfigurationObserver>>>,
}

impl Observers {
    pub(super) fn subscribe(&self, observer: Arc<dyn ConfigurationObserver>) {
        self.observers.write().push(observer);
    }

    pub(super) fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Deliver `event` to every subscriber in subscription order.
    ///
    /// The subscriber list is copied first, so observers may subscribe
    /// others or read the configuration from inside the callback.
    pub(super) fn emit(&self, event: ConfigurationEvent<'_>) {
        let observers = self.observers.read().clone();
        for observer in &observers {
            observer.on_event(&event);
        }
    }
}
