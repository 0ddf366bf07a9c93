//! Demo events and the bridge that carries them to the browser.
//!
//! The demo layer is handed a [`DemoBridge`] when it is built. Every rendered
//! demo section reports itself through the bridge, which forwards the event to
//! whichever [`DemoObserver`] is registered. The bridge only holds a weak
//! reference: when nothing is registered, or the observer is gone, events are
//! dropped silently.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Where a demo section lives in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSite<'a> {
    /// Source file reported by the demo layer.
    pub file: &'a str,
    /// 1-based line of the section's marker.
    pub line: usize,
    /// The section's tag.
    pub title: &'a str,
}

impl<'a> DemoSite<'a> {
    pub fn new(file: &'a str, line: usize, title: &'a str) -> Self {
        Self { file, line, title }
    }
}

/// Something a demo section reports while it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoEvent<'a> {
    /// The pointer is over the section. Only acted upon in follow mode.
    Hover(DemoSite<'a>),
    /// The user asked to see the section's code.
    Activate(DemoSite<'a>),
}

impl<'a> DemoEvent<'a> {
    #[must_use]
    pub fn site(&self) -> DemoSite<'a> {
        match *self {
            Self::Hover(site) | Self::Activate(site) => site,
        }
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.site().line
    }

    #[must_use]
    pub fn is_hover(&self) -> bool {
        matches!(self, Self::Hover(_))
    }
}

/// Receiver of demo events.
pub trait DemoObserver {
    /// Handles one event reported by the demo layer.
    fn on_demo_event(&mut self, event: DemoEvent<'_>);
}

/// Registration slot connecting the demo layer to one observer.
#[derive(Default)]
pub struct DemoBridge {
    observer: Option<Weak<RefCell<dyn DemoObserver>>>,
}

impl DemoBridge {
    /// Creates a bridge with no observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer`, replacing any previous registration.
    pub fn register<O>(&mut self, observer: &Rc<RefCell<O>>)
    where
        O: DemoObserver + 'static,
    {
        let weak: Weak<RefCell<O>> = Rc::downgrade(observer);
        self.observer = Some(weak);
        log::debug!("demo observer registered");
    }

    /// Removes the current registration.
    pub fn unregister(&mut self) {
        if self.observer.take().is_some() {
            log::debug!("demo observer unregistered");
        }
    }

    /// Returns whether a live observer is registered.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.observer
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Forwards an event to the registered observer.
    ///
    /// Without a live observer this does nothing. An event emitted while the
    /// observer is already handling one is dropped.
    pub fn emit(&self, event: DemoEvent<'_>) {
        let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) else {
            log::trace!("no demo observer for {event:?}");
            return;
        };
        match observer.try_borrow_mut() {
            Ok(mut observer) => observer.on_demo_event(event),
            Err(_) => log::debug!("dropped re-entrant demo event {event:?}"),
        };
    }
}

impl std::fmt::Debug for DemoBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoBridge")
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<(usize, bool)>,
    }

    impl DemoObserver for Recorder {
        fn on_demo_event(&mut self, event: DemoEvent<'_>) {
            self.lines.push((event.line(), event.is_hover()));
        }
    }

    /// Emits a nested event from inside its handler.
    struct Echo {
        bridge: Rc<RefCell<DemoBridge>>,
        handled: usize,
    }

    impl DemoObserver for Echo {
        fn on_demo_event(&mut self, event: DemoEvent<'_>) {
            self.handled += 1;
            self.bridge.borrow().emit(event);
        }
    }

    fn site(line: usize) -> DemoSite<'static> {
        DemoSite::new("demos.rs", line, "Widgets")
    }

    #[test]
    fn test_emit_without_observer_is_noop() {
        let bridge = DemoBridge::new();
        assert!(!bridge.is_connected());
        bridge.emit(DemoEvent::Activate(site(3)));
    }

    #[test]
    fn test_forwards_events() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut bridge = DemoBridge::new();
        bridge.register(&recorder);
        assert!(bridge.is_connected());

        bridge.emit(DemoEvent::Hover(site(4)));
        bridge.emit(DemoEvent::Activate(site(9)));
        assert_eq!(recorder.borrow().lines, vec![(4, true), (9, false)]);
    }

    #[test]
    fn test_dropped_observer_is_noop() {
        let mut bridge = DemoBridge::new();
        {
            let recorder = Rc::new(RefCell::new(Recorder::default()));
            bridge.register(&recorder);
        }
        assert!(!bridge.is_connected());
        bridge.emit(DemoEvent::Activate(site(1)));
    }

    #[test]
    fn test_unregister() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut bridge = DemoBridge::new();
        bridge.register(&recorder);
        bridge.unregister();
        bridge.emit(DemoEvent::Activate(site(1)));
        assert!(recorder.borrow().lines.is_empty());
    }

    #[test]
    fn test_reentrant_event_dropped() {
        let bridge = Rc::new(RefCell::new(DemoBridge::new()));
        let echo = Rc::new(RefCell::new(Echo {
            bridge: Rc::clone(&bridge),
            handled: 0,
        }));
        bridge.borrow_mut().register(&echo);

        bridge.borrow().emit(DemoEvent::Activate(site(2)));
        assert_eq!(echo.borrow().handled, 1);
    }

    #[test]
    fn test_register_concrete_observer_type() {
        let recorder: Rc<RefCell<Recorder>> = Rc::new(RefCell::new(Recorder::default()));
        let mut bridge = DemoBridge::new();
        bridge.register(&recorder);
        bridge.emit(DemoEvent::Hover(site(5)));

        // The bridge holds a weak handle only.
        assert_eq!(Rc::strong_count(&recorder), 1);
        assert_eq!(Rc::weak_count(&recorder), 1);
        assert_eq!(recorder.borrow().lines, vec![(5, true)]);
    }

    #[test]
    fn test_event_accessors() {
        let event = DemoEvent::Activate(site(12));
        assert_eq!(event.line(), 12);
        assert!(!event.is_hover());
        assert_eq!(event.site().title, "Widgets");
    }
}
