//! Request sequencing for out-of-order responses.
//!
//! Every outgoing request gets a strictly increasing number. A response is
//! applied only when its number is higher than every response already
//! resolved, so a slow early request can never overwrite a newer result.

use std::fmt;

/// Sequence number of one outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues sequence numbers and decides which responses win.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: u64,
    resolved: u64,
}

impl RequestSequencer {
    /// Create a sequencer with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new outgoing request.
    pub fn issue(&mut self) -> RequestSeq {
        self.issued += 1;
        RequestSeq(self.issued)
    }

    /// Record that `seq` resolved. Returns `true` if its response should be
    /// applied, `false` if a newer response was already applied.
    pub fn resolve(&mut self, seq: RequestSeq) -> bool {
        if seq.0 > self.resolved {
            self.resolved = seq.0;
            true
        } else {
            false
        }
    }

    /// Whether the newest issued request has not resolved yet.
    pub fn is_pending(&self) -> bool {
        self.resolved < self.issued
    }

    /// Whether `seq` is the newest request issued so far.
    pub fn is_latest(&self, seq: RequestSeq) -> bool {
        seq.0 == self.issued
    }
}
