use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Proof of holding one server. Only [`ResourcePool::release()`] consumes it, so a holder cannot silently drop its
/// slot without the compiler pointing at the call site.
#[must_use = "a grant must be handed back through ResourcePool::release"]
#[derive(Debug, PartialEq, Eq)]
pub struct Grant {
    ticket: u64,
}

impl Grant {
    /// Sequence number of this grant within its pool, starting at 0.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

/// Outcome of [`ResourcePool::acquire()`].
#[derive(Debug)]
pub enum Admission<Waiter> {
    /// A server was free. The waiter comes straight back along with its grant.
    Granted(Waiter, Grant),
    /// Every server is busy. The pool now owns the waiter; `ahead` others were already queued.
    Queued { ahead: usize },
}

/// Fixed number of identical servers with a strict first-come-first-served wait queue.
///
/// The pool stores queued waiters by value. A release with a non-empty queue hands the freed slot to the head waiter
/// directly, so the busy count never dips and no later arrival can jump the line.
#[derive(Debug)]
pub struct ResourcePool<Waiter> {
    capacity: NonZeroUsize,
    in_use: usize,
    wait_queue: VecDeque<Waiter>,
    grants_issued: u64,
    peak_in_use: usize,
}

impl<Waiter> ResourcePool<Waiter> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            in_use: 0,
            wait_queue: VecDeque::new(),
            grants_issued: 0,
            peak_in_use: 0,
        }
    }

    /// Request a server for `waiter`.
    pub fn acquire(&mut self, waiter: Waiter) -> Admission<Waiter> {
        if self.in_use < self.capacity.get() {
            debug_assert!(self.wait_queue.is_empty(), "queued waiters while a server is idle");
            self.in_use += 1;
            self.peak_in_use = self.peak_in_use.max(self.in_use);
            Admission::Granted(waiter, self.issue())
        } else {
            let ahead = self.wait_queue.len();
            self.wait_queue.push_back(waiter);
            Admission::Queued { ahead }
        }
    }

    /// Give a server back. If anyone is queued, the head of the queue receives the slot and is returned for the caller
    /// to resume.
    pub fn release(&mut self, grant: Grant) -> Option<(Waiter, Grant)> {
        debug_assert!(self.in_use > 0, "released grant {} on an idle pool", grant.ticket);
        match self.wait_queue.pop_front() {
            Some(next) => Some((next, self.issue())),
            None => {
                self.in_use -= 1;
                None
            },
        }
    }

    /// Hand back a grant whose holder never started service. Unlike [`release()`](ResourcePool::release) the slot is
    /// not passed on; queued waiters stay where they are.
    pub fn cancel(&mut self, grant: Grant) {
        debug_assert!(self.in_use > 0, "cancelled grant {} on an idle pool", grant.ticket);
        self.in_use -= 1;
    }

    fn issue(&mut self) -> Grant {
        let ticket = self.grants_issued;
        self.grants_issued += 1;
        Grant { ticket }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn in_use(&self) -> usize {
        self.in_use
    }

    pub fn queue_len(&self) -> usize {
        self.wait_queue.len()
    }

    /// Most servers ever busy at once.
    pub fn peak_in_use(&self) -> usize {
        self.peak_in_use
    }

    pub fn total_grants(&self) -> u64 {
        self.grants_issued
    }

    /// No server busy and nobody waiting.
    pub fn is_idle(&self) -> bool {
        self.in_use == 0 && self.wait_queue.is_empty()
    }
}
