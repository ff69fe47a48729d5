use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use log::debug;

use bodysync_peer::{
    transport::{LinkConditionerConfig, LocalHub},
    Peer, PeerConfig,
};
use bodysync_shared::{Identity, ModelName, PaintColor, UserInfo};

use super::EventLog;

/// Upper bound on delivery rounds before `exchange` gives up
const MAX_ROUNDS: usize = 64;

/// Several peers sharing one in-memory session group, driven by a manual
/// clock
pub struct TestSession {
    hub: LocalHub,
    config: PeerConfig,
    peers: Vec<Peer>,
    logs: Vec<EventLog>,
    now: Instant,
}

impl TestSession {
    pub fn new() -> Self {
        Self::with_conditioner(LinkConditionerConfig::perfect())
    }

    pub fn with_conditioner(conditioner: LinkConditionerConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        Self {
            hub: LocalHub::new(conditioner),
            config: PeerConfig::default(),
            peers: Vec::new(),
            logs: Vec::new(),
            now: Instant::now(),
        }
    }

    pub fn config(&self) -> &PeerConfig {
        &self.config
    }

    /// Adds a hosting peer and connects it. Returns its index.
    pub fn host(&mut self, name: &str) -> usize {
        let peer = Peer::host(self.config.clone(), UserInfo::new(name, name));
        self.add(peer)
    }

    /// Adds a joining peer and connects it. Returns its index.
    pub fn join(&mut self, name: &str) -> usize {
        let peer = Peer::join(self.config.clone(), UserInfo::new(name, name));
        self.add(peer)
    }

    fn add(&mut self, mut peer: Peer) -> usize {
        let user = peer.local().clone();
        peer.connect(self.hub.transport(user));
        self.peers.push(peer);
        self.logs.push(EventLog::default());
        self.peers.len() - 1
    }

    pub fn hub(&self) -> &LocalHub {
        &self.hub
    }

    pub fn peer(&self, index: usize) -> &Peer {
        &self.peers[index]
    }

    pub fn peer_mut(&mut self, index: usize) -> &mut Peer {
        &mut self.peers[index]
    }

    pub fn log(&self, index: usize) -> &EventLog {
        &self.logs[index]
    }

    pub fn identity(&self, index: usize) -> Identity {
        self.peers[index].local().identity.clone()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }

    /// Lets one peer drain its inbox and fire its due timers
    pub fn pump(&mut self, index: usize) {
        let events = self.peers[index].receive(self.now);
        self.logs[index].record(events);
    }

    /// Pumps every peer until no message is left in flight
    pub fn exchange(&mut self) {
        for round in 0..MAX_ROUNDS {
            for index in 0..self.peers.len() {
                self.pump(index);
            }
            if self.hub.pending() == 0 {
                debug!("Session quiet after {} rounds", round + 1);
                return;
            }
        }
        panic!("Session did not settle after {} rounds", MAX_ROUNDS);
    }

    /// Advances the clock and exchanges
    pub fn tick(&mut self, duration: Duration) {
        self.advance(duration);
        self.exchange();
    }

    /// Order-independent view of a peer's paint
    pub fn paint_of(&self, index: usize) -> BTreeMap<ModelName, BTreeMap<String, PaintColor>> {
        self.peers[index].state().paint().snapshot()
    }

    pub fn score_of(&self, observer: usize, participant: usize) -> Option<u32> {
        let identity = self.identity(participant);
        self.peers[observer].state().roster().score(&identity)
    }
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}
