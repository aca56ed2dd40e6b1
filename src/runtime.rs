use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// One item of the host loop's multiplexed stream.
///
/// Everything that can mutate a session arrives here in channel order:
/// terminal input, inbound peer progress from a lobby transport, and the
/// shared tick. Keystrokes are never reordered relative to each other.
#[derive(Clone, Debug)]
pub enum RaceEvent {
    Key(KeyEvent),
    /// Progress percentage reported for a networked peer lane.
    Peer { lane: usize, progress: f64 },
    Resize,
    /// The tick interval elapsed with nothing else to deliver.
    Tick,
}

/// Anything that can feed the host loop one event at a time.
pub trait EventSource: Send + 'static {
    /// Waits up to `timeout` for the next event; `None` means the interval
    /// passed quietly.
    fn next_event(&self, timeout: Duration) -> Option<RaceEvent>;
}

/// Terminal-backed source. A reader thread forwards crossterm events into
/// the channel; `injector` hands out a sender so a lobby transport (or a
/// test) can merge peer updates into the same ordered stream.
pub struct TerminalEvents {
    rx: Receiver<RaceEvent>,
    tx: Sender<RaceEvent>,
}

impl TerminalEvents {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();

        let reader = tx.clone();
        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) => reader.send(RaceEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => reader.send(RaceEvent::Resize),
                Ok(_) => Ok(()),
                Err(_) => break,
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx, tx }
    }

    /// A handle for out-of-band producers, e.g. peer progress updates.
    pub fn injector(&self) -> Sender<RaceEvent> {
        self.tx.clone()
    }
}

impl EventSource for TerminalEvents {
    fn next_event(&self, timeout: Duration) -> Option<RaceEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Channel-fed source for driving the loop without a terminal.
pub struct ChannelEvents {
    rx: Receiver<RaceEvent>,
}

impl ChannelEvents {
    pub fn new() -> (Self, Sender<RaceEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { rx }, tx)
    }
}

impl EventSource for ChannelEvents {
    fn next_event(&self, timeout: Duration) -> Option<RaceEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Pulls one event per call, substituting `Tick` whenever the interval
/// passes without input. Clock refresh and rival pacing therefore share a
/// single timer; there are no free-floating intervals to leak when a
/// session is torn down.
pub struct Runner<S: EventSource> {
    source: S,
    tick_every: Duration,
}

impl<S: EventSource> Runner<S> {
    pub fn new(source: S, tick_every: Duration) -> Self {
        Self { source, tick_every }
    }

    pub fn step(&self) -> RaceEvent {
        self.source
            .next_event(self.tick_every)
            .unwrap_or(RaceEvent::Tick)
    }
}
