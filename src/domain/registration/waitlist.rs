//! Ordered per-event waitlist.

use std::collections::VecDeque;

use crate::domain::foundation::{MemberId, RegistrationId};

use super::Registration;

/// FIFO queue of waitlisted registrations for one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitlistQueue {
    entries: VecDeque<Registration>,
}

impl WaitlistQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a queue from registrations already in promotion order.
    pub fn from_ordered(entries: Vec<Registration>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Appends to the tail. Returns the queue length after the append.
    pub fn enqueue(&mut self, registration: Registration) -> u32 {
        self.entries.push_back(registration);
        self.len()
    }

    pub fn peek(&self) -> Option<&Registration> {
        self.entries.front()
    }

    /// Removes and returns the head.
    pub fn pop_front(&mut self) -> Option<Registration> {
        self.entries.pop_front()
    }

    /// Removes a specific registration, keeping the order of the rest.
    pub fn remove(&mut self, id: &RegistrationId) -> Option<Registration> {
        let index = self.entries.iter().position(|r| &r.id == id)?;
        self.entries.remove(index)
    }

    /// Current 1-based position of a member in the queue.
    pub fn position_of(&self, member_id: &MemberId) -> Option<u32> {
        self.entries
            .iter()
            .position(|r| &r.member_id == member_id)
            .map(|index| u32::try_from(index + 1).unwrap_or(u32::MAX))
    }

    pub fn len(&self) -> u32 {
        u32::try_from(self.entries.len()).unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }
}
