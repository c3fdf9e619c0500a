use std::collections::VecDeque;

/// Kinds of discrete occurrences a tick can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEventType {
    /// Two bodies collided and their velocities were resolved
    Collision,

    /// A body hit a wall or the ground and bounced
    Bounce,

    /// An object came to rest and its velocity was snapped to zero
    CameToRest,

    /// An object at rest broke free of static friction
    StartedMoving,

    /// A projectile touched down or left the canvas
    Landed,

    /// The sliding box reached the end of the ramp
    ReachedEnd,

    /// A body was created from pointer input
    BodySpawned,

    /// A body was removed by user action
    BodyRemoved,

    /// A body exceeded its lifetime and was dropped
    BodyExpired,

    /// The scenario wrapped around and restarted itself
    Restarted,
}

/// An event recorded during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationEvent {
    /// The type of event
    pub event_type: SimulationEventType,

    /// Simulated time the event happened at
    pub time: f64,

    /// Index of the first body involved, if any
    pub body_a: Option<usize>,

    /// Index of the second body involved, if any
    pub body_b: Option<usize>,
}

impl SimulationEvent {
    /// An event not tied to any particular body
    pub fn new(event_type: SimulationEventType, time: f64) -> Self {
        Self { event_type, time, body_a: None, body_b: None }
    }

    /// An event about a single body
    pub fn for_body(event_type: SimulationEventType, time: f64, body: usize) -> Self {
        Self { event_type, time, body_a: Some(body), body_b: None }
    }

    /// An event about a pair of bodies
    pub fn for_pair(event_type: SimulationEventType, time: f64, a: usize, b: usize) -> Self {
        Self { event_type, time, body_a: Some(a), body_b: Some(b) }
    }
}

/// A queue of simulation events, refilled every tick
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<SimulationEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self { events: VecDeque::new() }
    }

    /// Adds an event to the queue
    pub fn push(&mut self, event: SimulationEvent) {
        self.events.push_back(event);
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimulationEvent> + '_ {
        self.events.iter()
    }

    /// Gets all events of a specific type
    pub fn events_of_type(&self, event_type: SimulationEventType) -> Vec<&SimulationEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }
}
