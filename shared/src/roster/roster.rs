use log::{info, warn};

use crate::{roster::participant::Participant, types::Identity};

/// Ordered list of the session's participants and the host designation.
///
/// Lookups by identity never fail loudly: join and message ordering is not
/// guaranteed by the transport, so a missing participant is expected.
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
        }
    }

    /// Appends a participant. Returns false if the identity was already on
    /// the roster, in which case only the display name is refreshed.
    pub fn join(&mut self, participant: Participant) -> bool {
        if let Some(existing) = self.get_mut(&participant.identity) {
            existing.display_name = participant.display_name;
            return false;
        }

        info!("{} joined the session", participant.identity);
        self.participants.push(participant);
        true
    }

    /// Records a join notification from the transport as a zero-score
    /// participant.
    pub fn record_join(&mut self, identity: Identity, display_name: impl Into<String>) -> bool {
        self.join(Participant::new(identity, display_name))
    }

    pub fn remove(&mut self, identity: &Identity) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|participant| &participant.identity == identity)?;
        let removed = self.participants.remove(index);
        info!("{} left the session", identity);

        if removed.is_host {
            self.elect_host();
        }

        Some(removed)
    }

    /// Promotes the first participant in roster order if no host remains.
    /// Returns the host's identity, if any.
    pub fn elect_host(&mut self) -> Option<Identity> {
        if let Some(host) = self.host() {
            return Some(host.identity.clone());
        }

        let first = self.participants.first_mut()?;
        first.is_host = true;
        info!("{} is now hosting the session", first.identity);
        Some(first.identity.clone())
    }

    pub fn score(&self, identity: &Identity) -> Option<u32> {
        self.get(identity).map(|participant| participant.score)
    }

    /// Only the quiz coordinator awards points.
    pub(crate) fn increment_score(&mut self, identity: &Identity) -> bool {
        let Some(participant) = self.get_mut(identity) else {
            warn!("Cannot score unknown participant {}", identity);
            return false;
        };
        participant.score += 1;
        true
    }

    /// Adopt a full roster sent by a peer, keeping `local` if the sender did
    /// not know about it yet.
    pub fn replace_with(&mut self, incoming: Vec<Participant>, local: &Participant) {
        let mut participants: Vec<Participant> = Vec::with_capacity(incoming.len() + 1);
        for participant in incoming {
            if participants
                .iter()
                .any(|known| known.identity == participant.identity)
            {
                continue;
            }
            participants.push(participant);
        }

        if !participants
            .iter()
            .any(|participant| participant.identity == local.identity)
        {
            let current = self.get(&local.identity).cloned();
            participants.push(current.unwrap_or_else(|| local.clone()));
        }

        self.participants = participants;
    }

    pub fn reset_scores(&mut self) {
        for participant in self.participants.iter_mut() {
            participant.score = 0;
        }
    }

    pub fn host(&self) -> Option<&Participant> {
        self.participants.iter().find(|participant| participant.is_host)
    }

    pub fn is_host(&self, identity: &Identity) -> bool {
        self.get(identity)
            .map(|participant| participant.is_host)
            .unwrap_or(false)
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.get(identity).is_some()
    }

    pub fn get(&self, identity: &Identity) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|participant| &participant.identity == identity)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    fn get_mut(&mut self, identity: &Identity) -> Option<&mut Participant> {
        self.participants
            .iter_mut()
            .find(|participant| &participant.identity == identity)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}
