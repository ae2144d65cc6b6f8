//! One-at-a-time guard for user-initiated submissions.

use std::sync::atomic::{AtomicBool, Ordering};

/// Kinds of form submission that must not run twice concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// `login`
    Login,
    /// `register`
    Register,
    /// `switch_company`
    SwitchCompany,
}

/// Tracks which submissions are in flight.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    login: AtomicBool,
    register: AtomicBool,
    switch_company: AtomicBool,
}

/// Held while a submission runs; releases the slot on drop.
#[derive(Debug)]
pub struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl SubmissionGuard {
    /// Creates a guard with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `kind`, or `None` if one is already running.
    pub fn try_begin(&self, kind: Submission) -> Option<InFlight<'_>> {
        let flag = self.flag(kind);
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight { flag })
    }

    /// Whether a submission of `kind` is running.
    pub fn is_in_flight(&self, kind: Submission) -> bool {
        self.flag(kind).load(Ordering::Acquire)
    }

    fn flag(&self, kind: Submission) -> &AtomicBool {
        match kind {
            Submission::Login => &self.login,
            Submission::Register => &self.register,
            Submission::SwitchCompany => &self.switch_company,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_rejected_until_drop() {
        let guard = SubmissionGuard::new();
        let first = guard.try_begin(Submission::Login);
        assert!(first.is_some());
        assert!(guard.try_begin(Submission::Login).is_none());
        assert!(guard.try_begin(Submission::Register).is_some());

        drop(first);
        assert!(!guard.is_in_flight(Submission::Login));
        assert!(guard.try_begin(Submission::Login).is_some());
    }
}
