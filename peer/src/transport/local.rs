//! In-memory broadcast hub. Routes envelopes between peers of one process
//! without network I/O, applying a [`LinkConditionerConfig`] on the way.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

use log::{debug, info};

use bodysync_shared::{Identity, UserInfo};

use super::{
    LinkConditionerConfig, MessageReceiver, MessageSender, Transport, TransportError,
    TransportEvent,
};

struct Member {
    user: UserInfo,
    inbox: VecDeque<TransportEvent>,
    connected: bool,
}

struct HubState {
    members: Vec<Member>,
    conditioner: LinkConditionerConfig,
    rng: fastrand::Rng,
    dropped: usize,
}

impl HubState {
    fn member_mut(&mut self, identity: &Identity) -> Option<&mut Member> {
        self.members
            .iter_mut()
            .find(|member| &member.user.identity == identity)
    }
}

/// A session group shared by every [`LocalTransport`] created from it
#[derive(Clone)]
pub struct LocalHub {
    state: Arc<Mutex<HubState>>,
}

impl LocalHub {
    pub fn new(conditioner: LinkConditionerConfig) -> Self {
        let rng = fastrand::Rng::with_seed(conditioner.seed);
        Self {
            state: Arc::new(Mutex::new(HubState {
                members: Vec::new(),
                conditioner,
                rng,
                dropped: 0,
            })),
        }
    }

    /// Transport for `user`. The user becomes a member on connect.
    pub fn transport(&self, user: UserInfo) -> LocalTransport {
        LocalTransport {
            hub: self.clone(),
            user,
        }
    }

    /// Cuts `identity` off the group: it receives `Disconnected`, everyone
    /// else receives `Left`.
    pub fn disconnect(&self, identity: &Identity) {
        let Ok(mut state) = self.lock() else {
            return;
        };

        for member in state.members.iter_mut() {
            if &member.user.identity == identity {
                if member.connected {
                    member.connected = false;
                    member.inbox.push_back(TransportEvent::Disconnected);
                }
            } else if member.connected {
                member
                    .inbox
                    .push_back(TransportEvent::Left(identity.clone()));
            }
        }
        info!("{} disconnected from hub", identity);
    }

    /// Number of events waiting in all inboxes
    pub fn pending(&self) -> usize {
        self.lock()
            .map(|state| state.members.iter().map(|member| member.inbox.len()).sum())
            .unwrap_or(0)
    }

    /// Number of message deliveries dropped by the conditioner
    pub fn dropped(&self) -> usize {
        self.lock().map(|state| state.dropped).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HubState>, TransportError> {
        self.state.lock().map_err(|_| TransportError::Disconnected)
    }

    fn join(&self, user: &UserInfo) {
        let Ok(mut state) = self.lock() else {
            return;
        };

        for member in state.members.iter_mut() {
            if member.connected && member.user.identity != user.identity {
                member.inbox.push_back(TransportEvent::Joined(user.clone()));
            }
        }

        match state.member_mut(&user.identity) {
            Some(member) => {
                member.user = user.clone();
                member.inbox.clear();
                member.connected = true;
            }
            None => state.members.push(Member {
                user: user.clone(),
                inbox: VecDeque::new(),
                connected: true,
            }),
        }
        info!("{} connected to hub", user.identity);
    }
}

impl Default for LocalHub {
    fn default() -> Self {
        Self::new(LinkConditionerConfig::default())
    }
}

/// Connection of one peer to a [`LocalHub`]
pub struct LocalTransport {
    hub: LocalHub,
    user: UserInfo,
}

impl Transport for LocalTransport {
    fn connect(self: Box<Self>) -> (Box<dyn MessageSender>, Box<dyn MessageReceiver>) {
        self.hub.join(&self.user);

        let sender = LocalSender {
            hub: self.hub.clone(),
            identity: self.user.identity.clone(),
        };
        let receiver = LocalReceiver {
            hub: self.hub,
            identity: self.user.identity,
        };
        (Box::new(sender), Box::new(receiver))
    }
}

impl From<LocalTransport> for Box<dyn Transport> {
    fn from(transport: LocalTransport) -> Self {
        Box::new(transport)
    }
}

struct LocalSender {
    hub: LocalHub,
    identity: Identity,
}

impl MessageSender for LocalSender {
    fn send(&self, payload: &str) -> Result<(), TransportError> {
        let mut state = self.hub.lock()?;
        let state = &mut *state;

        let connected = state
            .members
            .iter()
            .any(|member| member.user.identity == self.identity && member.connected);
        if !connected {
            return Err(TransportError::Disconnected);
        }

        for member in state.members.iter_mut() {
            if member.user.identity == self.identity || !member.connected {
                continue;
            }
            if state.conditioner.loss > 0.0 && state.rng.f32() < state.conditioner.loss {
                debug!("Dropping message for {}", member.user.identity);
                state.dropped += 1;
                continue;
            }
            member
                .inbox
                .push_back(TransportEvent::Message(payload.to_string()));
        }

        Ok(())
    }
}

struct LocalReceiver {
    hub: LocalHub,
    identity: Identity,
}

impl MessageReceiver for LocalReceiver {
    fn receive(&mut self) -> Result<Option<TransportEvent>, TransportError> {
        let mut state = self.hub.lock()?;
        let state = &mut *state;

        let Some(member) = state
            .members
            .iter_mut()
            .find(|member| member.user.identity == self.identity)
        else {
            return Err(TransportError::Disconnected);
        };

        let len = member.inbox.len();
        if state.conditioner.reorder && len > 1 {
            let index = state.rng.usize(..len);
            return Ok(member.inbox.remove(index));
        }

        Ok(member.inbox.pop_front())
    }
}

impl Drop for LocalReceiver {
    // a dropped connection is reported to the others like a lost one
    fn drop(&mut self) {
        let Ok(mut state) = self.hub.lock() else {
            return;
        };

        let Some(member) = state.member_mut(&self.identity) else {
            return;
        };
        member.inbox.clear();
        if !member.connected {
            return;
        }
        member.connected = false;

        for member in state.members.iter_mut() {
            if member.connected {
                member
                    .inbox
                    .push_back(TransportEvent::Left(self.identity.clone()));
            }
        }
        debug!("{} dropped its hub connection", self.identity);
    }
}
