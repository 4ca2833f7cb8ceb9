//! Per-event capacity accounting.

/// Confirmed-registration count against an optional capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityLedger {
    capacity: Option<u32>,
    confirmed: u32,
}

impl CapacityLedger {
    /// Ledger for an event with the given capacity (`None` = unlimited).
    pub fn new(capacity: Option<u32>) -> Self {
        Self::with_confirmed(capacity, 0)
    }

    /// Ledger seeded from an existing confirmed count.
    pub fn with_confirmed(capacity: Option<u32>, confirmed: u32) -> Self {
        Self {
            capacity,
            confirmed,
        }
    }

    /// Takes a slot if one is free.
    ///
    /// Unlimited ledgers always succeed. The count is still tracked for
    /// reporting.
    pub fn reserve(&mut self) -> bool {
        match self.capacity {
            Some(capacity) if self.confirmed >= capacity => false,
            _ => {
                self.confirmed = self.confirmed.saturating_add(1);
                true
            }
        }
    }

    /// Gives a slot back. Floored at zero.
    pub fn release(&mut self) {
        self.confirmed = self.confirmed.saturating_sub(1);
    }

    pub fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    pub fn confirmed(&self) -> u32 {
        self.confirmed
    }

    /// Free slots, or `None` when unlimited.
    pub fn remaining(&self) -> Option<u32> {
        self.capacity
            .map(|capacity| capacity.saturating_sub(self.confirmed))
    }

    pub fn is_full(&self) -> bool {
        matches!(self.remaining(), Some(0))
    }

    /// True when more slots are confirmed than exist.
    pub fn is_overcommitted(&self) -> bool {
        matches!(self.capacity, Some(capacity) if self.confirmed > capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_stops_at_capacity() {
        let mut ledger = CapacityLedger::new(Some(2));
        assert!(ledger.reserve());
        assert!(ledger.reserve());
        assert!(!ledger.reserve());
        assert_eq!(ledger.confirmed(), 2);
        assert!(ledger.is_full());
    }

    #[test]
    fn release_frees_a_slot() {
        let mut ledger = CapacityLedger::with_confirmed(Some(1), 1);
        assert!(!ledger.reserve());
        ledger.release();
        assert_eq!(ledger.remaining(), Some(1));
        assert!(ledger.reserve());
    }

    #[test]
    fn release_is_floored_at_zero() {
        let mut ledger = CapacityLedger::new(Some(3));
        ledger.release();
        assert_eq!(ledger.confirmed(), 0);
    }

    #[test]
    fn zero_capacity_is_always_full() {
        let mut ledger = CapacityLedger::new(Some(0));
        assert!(ledger.is_full());
        assert!(!ledger.reserve());
    }

    #[test]
    fn unlimited_always_reserves() {
        let mut ledger = CapacityLedger::new(None);
        for _ in 0..1000 {
            assert!(ledger.reserve());
        }
        assert_eq!(ledger.remaining(), None);
        assert!(!ledger.is_full());
        assert!(!ledger.is_overcommitted());
    }

    #[test]
    fn overcommit_is_detected() {
        assert!(CapacityLedger::with_confirmed(Some(2), 3).is_overcommitted());
        assert!(!CapacityLedger::with_confirmed(Some(2), 2).is_overcommitted());
    }
}
