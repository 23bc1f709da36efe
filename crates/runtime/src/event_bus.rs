/// Event kinds emitted by the globe session.
pub mod kinds {
    pub const DATA_READY: &str = "data.ready";
    pub const DATA_FAILED: &str = "data.failed";
    pub const PICK_HIT: &str = "pick.hit";
    pub const PICK_MISS: &str = "pick.miss";
}

/// Structured event tagged with the frame it happened in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
    max_events: Option<usize>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            max_events: None,
        }
    }

    /// Keeps at most `max_events` undrained events, dropping the oldest first.
    pub fn bounded(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events: Some(max_events),
        }
    }

    pub fn emit(&mut self, frame_index: u64, kind: &'static str, message: impl Into<String>) {
        self.events.push(Event {
            frame_index,
            kind,
            message: message.into(),
        });
        if let Some(max) = self.max_events
            && self.events.len() > max
        {
            let overflow = self.events.len() - max;
            self.events.drain(..overflow);
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn last_of_kind(&self, kind: &str) -> Option<&Event> {
        self.events.iter().rev().find(|e| e.kind == kind)
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, kinds};

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        bus.emit(2, kinds::PICK_HIT, "Testland");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].frame_index, 2);
        assert_eq!(bus.events()[0].kind, "pick.hit");
    }

    #[test]
    fn last_of_kind_skips_other_kinds() {
        let mut bus = EventBus::new();
        bus.emit(0, kinds::PICK_MISS, "");
        bus.emit(1, kinds::PICK_HIT, "A");
        bus.emit(2, kinds::PICK_MISS, "");
        assert_eq!(bus.last_of_kind(kinds::PICK_HIT).map(|e| e.frame_index), Some(1));
        assert_eq!(bus.last_of_kind(kinds::DATA_READY), None);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(0, kinds::DATA_READY, "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }

    #[test]
    fn bounded_bus_drops_oldest_events() {
        let mut bus = EventBus::bounded(3);
        for i in 0..10 {
            bus.emit(i, kinds::PICK_MISS, "");
        }
        let frames: Vec<u64> = bus.events().iter().map(|e| e.frame_index).collect();
        assert_eq!(frames, vec![7, 8, 9]);

        let mut empty = EventBus::bounded(0);
        empty.emit(0, kinds::PICK_HIT, "A");
        assert!(empty.events().is_empty());
    }
}
