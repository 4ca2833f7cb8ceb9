//! RegistrationEngine - Capacity, waitlist, and lifecycle orchestration.
//!
//! # Concurrency
//!
//! Every mutation for an event runs under that event's own async mutex.
//! Locks are created on first use and live in a `DashMap`, so different
//! events never contend. The guarded value is the event's [`EventBook`]
//! (ledger plus waitlist), hydrated from the repository on first use.
//!
//! Writes compute the next book on a copy, persist, and only then replace
//! the cached book. A failed write drops the cache so the next call
//! re-hydrates from storage.
//!
//! Books for events that have already started are evicted whenever a new
//! event is first touched, so the map holds at most the upcoming events
//! plus any with a request in flight.
//!
//! The cache assumes this process is the only writer of registrations.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::domain::access::{AccessContext, AccessEvaluator, DenialReason};
use crate::domain::event::Event;
use crate::domain::foundation::{ErrorCode, EventId, MemberId, Timestamp};
use crate::domain::registration::{
    CancelOutcome, CancellationReceipt, CapacityLedger, RefundPolicy, RegisterOutcome,
    Registration, RegistrationError, RegistrationRejection, RegistrationStatus, WaitlistQueue,
};
use crate::ports::RegistrationRepository;

/// In-memory capacity and waitlist state for one event.
#[derive(Debug, Clone)]
struct EventBook {
    ledger: CapacityLedger,
    waitlist: WaitlistQueue,
}

type BookSlot = Arc<Mutex<Option<EventBook>>>;

#[derive(Debug)]
struct BookEntry {
    starts_at: Timestamp,
    slot: BookSlot,
}

/// Result of a registration attempt.
///
/// `promoted` lists waitlisted registrations moved into slots that were
/// already free (after a capacity increase) before the caller was seated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub outcome: RegisterOutcome,
    pub promoted: Vec<Registration>,
}

/// Serializes registration changes per event.
pub struct RegistrationEngine {
    repository: Arc<dyn RegistrationRepository>,
    refund_policy: RefundPolicy,
    books: DashMap<EventId, BookEntry>,
}

impl RegistrationEngine {
    pub fn new(repository: Arc<dyn RegistrationRepository>, refund_policy: RefundPolicy) -> Self {
        Self {
            repository,
            refund_policy,
            books: DashMap::new(),
        }
    }

    pub fn refund_policy(&self) -> &RefundPolicy {
        &self.refund_policy
    }

    /// Registers `ctx.member` for the event, or waitlists them when full.
    ///
    /// See [`RegistrationEngine::admit`].
    pub async fn register(
        &self,
        event: &Event,
        ctx: &AccessContext,
        now: Timestamp,
    ) -> Result<RegisterOutcome, RegistrationError> {
        Ok(self.admit(event, ctx, now).await?.outcome)
    }

    /// Registers `ctx.member` for the event, or waitlists them when full.
    ///
    /// Eligibility is re-evaluated here even if the caller checked it
    /// earlier. Free slots go to the waitlist, oldest first, before the
    /// caller is considered. Nothing is persisted for the caller unless the
    /// outcome is `Registered` or `Waitlisted`.
    #[instrument(skip(self, event, ctx, now), fields(event_id = %event.id))]
    pub async fn admit(
        &self,
        event: &Event,
        ctx: &AccessContext,
        now: Timestamp,
    ) -> Result<Admission, RegistrationError> {
        let rejected = |rejection| Admission {
            outcome: RegisterOutcome::Rejected(rejection),
            promoted: Vec::new(),
        };

        let eligibility = AccessEvaluator::can_register(event, ctx);
        if let Some(rejection) = RegistrationRejection::from_eligibility(eligibility) {
            tracing::debug!(code = rejection.code(), "registration denied");
            return Ok(rejected(rejection));
        }
        let Some(member) = ctx.member() else {
            return Ok(rejected(RegistrationRejection::denied(
                DenialReason::NoMemberProfile,
            )));
        };
        if event.is_registration_closed(&now) {
            return Ok(rejected(RegistrationRejection::RegistrationClosed));
        }

        let slot = self.slot(event, &now);
        let mut cached = slot.lock().await;

        if self
            .repository
            .find_active_for(&event.id, &member.id)
            .await?
            .is_some()
        {
            return Ok(rejected(RegistrationRejection::AlreadyRegistered));
        }

        let mut book = self.working_copy(&mut cached, event).await?;
        if book.ledger.is_overcommitted() {
            return Err(invariant(overcommit_message(event, &book)));
        }

        let promoted = promote_into_free_slots(&mut book, now)?;
        if !promoted.is_empty() {
            if let Err(err) = self.repository.update_statuses(&promoted).await {
                *cached = None;
                tracing::error!(error = %err, "failed to persist waitlist promotions");
                return Err(err.into());
            }
            *cached = Some(book.clone());
            tracing::info!(
                promoted = ?promoted.iter().map(|r| r.member_id).collect::<Vec<_>>(),
                "waitlist promoted into free slots"
            );
        }

        let registration = if book.ledger.reserve() {
            Registration::registered(event.id, member.id, now)
        } else {
            let position = book.waitlist.len().saturating_add(1);
            let registration = Registration::waitlisted(event.id, member.id, position, now);
            book.waitlist.enqueue(registration.clone());
            registration
        };

        if let Err(err) = self.repository.create(&registration).await {
            *cached = None;
            if err.code == ErrorCode::DuplicateRegistration {
                return Ok(Admission {
                    outcome: RegisterOutcome::Rejected(RegistrationRejection::AlreadyRegistered),
                    promoted,
                });
            }
            tracing::error!(error = %err, "failed to persist registration");
            return Err(err.into());
        }
        *cached = Some(book);

        tracing::info!(
            registration_id = %registration.id,
            member_id = %member.id,
            status = %registration.status,
            waitlist_position = registration.waitlist_position,
            "registration committed"
        );

        let outcome = match registration.status {
            RegistrationStatus::Waitlisted => RegisterOutcome::Waitlisted(registration),
            _ => RegisterOutcome::Registered(registration),
        };
        Ok(Admission { outcome, promoted })
    }

    /// Cancels the member's active registration.
    ///
    /// Cancelling a confirmed registration frees its slot. Every free slot
    /// is then filled from the waitlist head. The cancellation and the
    /// promotions are persisted as one batch.
    ///
    /// An event already over capacity still accepts cancellations; nobody
    /// is promoted until the confirmed count drops below capacity.
    #[instrument(skip(self, event, now), fields(event_id = %event.id, member_id = %member_id))]
    pub async fn cancel(
        &self,
        event: &Event,
        member_id: &MemberId,
        now: Timestamp,
    ) -> Result<CancelOutcome, RegistrationError> {
        let slot = self.slot(event, &now);
        let mut cached = slot.lock().await;

        let Some(mut registration) = self
            .repository
            .find_active_for(&event.id, member_id)
            .await?
        else {
            return Ok(CancelOutcome::Rejected(RegistrationRejection::NotRegistered));
        };

        let mut book = self.working_copy(&mut cached, event).await?;

        let refund_percentage = self.refund_policy.refund_percentage(&now, &event.start_time);
        let previous = registration
            .cancel(refund_percentage, now)
            .map_err(|e| invariant(format!("active registration could not be cancelled: {}", e)))?;

        match previous {
            RegistrationStatus::Registered => book.ledger.release(),
            RegistrationStatus::Waitlisted => {
                if book.waitlist.remove(&registration.id).is_none() {
                    *cached = None;
                    return Err(invariant(format!(
                        "waitlisted registration {} missing from queue",
                        registration.id
                    )));
                }
            }
            other => {
                return Err(invariant(format!(
                    "registration {} reported as active with status {}",
                    registration.id, other
                )));
            }
        }

        if book.ledger.is_overcommitted() {
            tracing::error!(
                detail = %overcommit_message(event, &book),
                "event over capacity; cancellation proceeds without promotion"
            );
        }
        let promoted = promote_into_free_slots(&mut book, now)?;

        let mut batch = Vec::with_capacity(promoted.len() + 1);
        batch.push(registration.clone());
        batch.extend(promoted.iter().cloned());

        if let Err(err) = self.repository.update_statuses(&batch).await {
            *cached = None;
            tracing::error!(error = %err, "failed to persist cancellation");
            return Err(err.into());
        }
        *cached = Some(book);

        tracing::info!(
            registration_id = %registration.id,
            refund = %refund_percentage,
            promoted = ?promoted.iter().map(|p| p.member_id).collect::<Vec<_>>(),
            "cancellation committed"
        );

        Ok(CancelOutcome::Cancelled(CancellationReceipt {
            registration,
            previous_status: previous,
            refund_percentage,
            promoted,
        }))
    }

    /// Confirmed count and waitlist length as currently cached.
    ///
    /// `None` when the event has not been touched since start-up.
    pub async fn snapshot(&self, event_id: &EventId) -> Option<(u32, u32)> {
        let slot = self.books.get(event_id).map(|entry| Arc::clone(&entry.slot))?;
        let cached = slot.lock().await;
        cached
            .as_ref()
            .map(|book| (book.ledger.confirmed(), book.waitlist.len()))
    }

    /// Drops cached books for events that started before `now`.
    ///
    /// Books with a request in flight are kept.
    pub fn evict_started(&self, now: &Timestamp) {
        self.books
            .retain(|_, entry| entry.starts_at.is_after(now) || Arc::strong_count(&entry.slot) > 1);
    }

    fn slot(&self, event: &Event, now: &Timestamp) -> BookSlot {
        if let Some(entry) = self.books.get(&event.id) {
            return Arc::clone(&entry.slot);
        }
        self.evict_started(now);
        let entry = self.books.entry(event.id).or_insert_with(|| BookEntry {
            starts_at: event.start_time,
            slot: BookSlot::default(),
        });
        Arc::clone(&entry.slot)
    }

    /// Returns a mutable copy of the event's book, hydrating if needed.
    async fn working_copy(
        &self,
        cached: &mut Option<EventBook>,
        event: &Event,
    ) -> Result<EventBook, RegistrationError> {
        let mut book = match cached.take() {
            Some(book) => book,
            None => self.hydrate(event).await?,
        };

        // Ingestion may have changed the capacity since the book was built.
        if book.ledger.capacity() != event.capacity {
            book.ledger = CapacityLedger::with_confirmed(event.capacity, book.ledger.confirmed());
        }

        *cached = Some(book.clone());
        Ok(book)
    }

    async fn hydrate(&self, event: &Event) -> Result<EventBook, RegistrationError> {
        let confirmed = self.repository.count_registered(&event.id).await?;
        let waitlist = self.repository.list_waitlist_ordered(&event.id).await?;
        tracing::debug!(confirmed, waitlisted = waitlist.len(), "event book hydrated");

        Ok(EventBook {
            ledger: CapacityLedger::with_confirmed(event.capacity, confirmed),
            waitlist: WaitlistQueue::from_ordered(waitlist),
        })
    }
}

/// Moves waitlist heads into free slots, oldest first.
fn promote_into_free_slots(
    book: &mut EventBook,
    now: Timestamp,
) -> Result<Vec<Registration>, RegistrationError> {
    let mut promoted = Vec::new();
    while book.waitlist.peek().is_some() && book.ledger.reserve() {
        let Some(mut head) = book.waitlist.pop_front() else {
            break;
        };
        head.promote(now)
            .map_err(|e| invariant(format!("waitlist head could not be promoted: {}", e)))?;
        promoted.push(head);
    }
    Ok(promoted)
}

fn overcommit_message(event: &Event, book: &EventBook) -> String {
    format!(
        "event {} has {} confirmed registrations for capacity {:?}",
        event.id,
        book.ledger.confirmed(),
        event.capacity
    )
}

fn invariant(message: String) -> RegistrationError {
    tracing::error!(%message, "registration invariant violated");
    RegistrationError::InvariantViolation(message)
}
