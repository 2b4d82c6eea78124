//! Ordering primitives for reconciling the one-shot fetch with the event stream.

/// Count of session events processed since mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision(u64);

impl Revision {
    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Issued when a one-shot fetch starts.
///
/// The fetch result only applies while the revision it was issued at is
/// still current, i.e. no subscription event has been processed since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    issued_at: Revision,
}

impl FetchTicket {
    pub(crate) fn new(issued_at: Revision) -> Self {
        Self { issued_at }
    }

    pub fn issued_at(&self) -> Revision {
        self.issued_at
    }

    pub fn is_current(&self, current: Revision) -> bool {
        self.issued_at == current
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LatchKind {
    /// `InitialSession` carrying a session: landing redirect runs once.
    InitialSession,
    /// `InitialSession` without a session: the anonymous transition runs once.
    InitialAnonymous,
}

/// One-time guard for a transition's side effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latch {
    tripped: bool,
}

impl Latch {
    /// Trip the latch. Returns true only the first time.
    pub fn trip(&mut self) -> bool {
        !std::mem::replace(&mut self.tripped, true)
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped
    }
}
