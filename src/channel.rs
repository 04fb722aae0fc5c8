//! Bounded message queue shared between execution contexts
//!
//! The queue lives in a `critical-section` mutex so an interrupt handler
//! or a UI task can post messages that the render loop drains between
//! ticks. Nothing here blocks: a full queue rejects the message, an empty
//! queue reports so.

use core::{cell::RefCell, fmt};

use critical_section::Mutex;
use heapless::Deque;

/// Message rejected because the queue was full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

impl<T> TrySendError<T> {
    /// Take back the rejected message
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue is full")
    }
}

/// No message was waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

impl fmt::Display for TryReceiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue is empty")
    }
}

/// Fixed-capacity FIFO guarded by a critical section
///
/// Usually placed in a `static` and split into [`Sender`] and [`Receiver`]
/// handles.
pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Append a message, handing it back if there is no room
    pub fn try_send(&self, message: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            self.queue
                .borrow_ref_mut(cs)
                .push_back(message)
                .map_err(TrySendError)
        })
    }

    /// Take the oldest message
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            self.queue
                .borrow_ref_mut(cs)
                .pop_front()
                .ok_or(TryReceiveError)
        })
    }

    /// Number of messages waiting
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every waiting message
    pub fn clear(&self) {
        critical_section::with(|cs| self.queue.borrow_ref_mut(cs).clear());
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting side of a [`Channel`]
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, message: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(message)
    }
}

/// Draining side of a [`Channel`]
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<'a, T, const SIZE: usize> Receiver<'a, T, SIZE> {
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }

    /// Iterate over the messages waiting right now
    ///
    /// Each step takes its own critical section, so senders are never
    /// locked out for the whole drain.
    pub fn drain(&self) -> Drain<'a, T, SIZE> {
        Drain {
            channel: self.channel,
        }
    }
}

/// Iterator returned by [`Receiver::drain`]
pub struct Drain<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Iterator for Drain<'_, T, SIZE> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.channel.try_receive().ok()
    }
}
