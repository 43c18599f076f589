/// Identifies one forecast request. Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// Hands out request ids and remembers the newest one that has settled,
/// either applied or failed, so that slower responses to older requests can
/// be dropped.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: u64,
    applied: Option<RequestId>,
    settled: Option<RequestId>,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestId {
        self.issued += 1;
        RequestId(self.issued)
    }

    /// True when a newer request has already succeeded or failed.
    #[must_use]
    pub fn is_stale(&self, id: RequestId) -> bool {
        self.settled.is_some_and(|settled| id < settled)
    }

    /// Records `id` as applied unless it is stale.
    pub fn accept(&mut self, id: RequestId) -> bool {
        if self.is_stale(id) {
            return false;
        }
        self.applied = Some(id);
        self.settled = Some(id);
        true
    }

    /// Records the failure of `id` unless it is stale. Older requests still
    /// in flight are dropped when they finish.
    pub fn reject(&mut self, id: RequestId) -> bool {
        if self.is_stale(id) {
            return false;
        }
        self.settled = Some(id);
        true
    }

    #[must_use]
    pub fn applied(&self) -> Option<RequestId> {
        self.applied
    }
}
