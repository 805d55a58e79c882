//! Datagrams parked until their next hop resolves. The main concern here is that flush and
//! abandonment each observe a consistent snapshot of a next hop's queue.
use std::collections::VecDeque;
use std::sync::Arc;

use dashmap::DashMap;

use super::PendingBuffer;
use crate::config::DEFAULT_PENDING_CAPACITY;
use crate::layer::ip::InterfaceId;
use crate::wire::Ipv4Address;

/// A datagram waiting for address resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PendingDatagram {
    /// The complete datagram, ready for transmission.
    pub datagram: Vec<u8>,
    /// The source address of the datagram, where a report about it would go.
    pub source: Ipv4Address,
    /// The next hop being resolved.
    pub next_hop: Ipv4Address,
    /// The interface to transmit on once resolved.
    pub interface: InterfaceId,
}

/// A concurrent pending buffer, bounded per next hop.
///
/// When the queue of a next hop is full the oldest datagram in it is discarded. Clones share the
/// same storage, so a resolver can keep one while the router holds another.
#[derive(Debug, Clone)]
pub struct PendingQueue {
    queues: Arc<DashMap<Ipv4Address, VecDeque<PendingDatagram>>>,
    capacity: usize,
}

impl PendingQueue {
    /// Create a buffer holding up to `capacity` datagrams per next hop.
    pub fn new(capacity: usize) -> Self {
        PendingQueue {
            queues: Arc::new(DashMap::new()),
            capacity,
        }
    }

    /// Count datagrams waiting for a next hop.
    pub fn count(&self, next_hop: Ipv4Address) -> usize {
        self.queues
            .get(&next_hop)
            .map(|queue| queue.len())
            .unwrap_or(0)
    }

    /// Total datagrams waiting across all next hops.
    pub fn total(&self) -> usize {
        self.queues.iter().map(|entry| entry.value().len()).sum()
    }

    /// List next hops with waiting datagrams.
    pub fn next_hops(&self) -> Vec<Ipv4Address> {
        self.queues.iter().map(|entry| *entry.key()).collect()
    }

    fn take(&self, next_hop: Ipv4Address) -> Vec<PendingDatagram> {
        self.queues
            .remove(&next_hop)
            .map(|(_, queue)| queue.into())
            .unwrap_or_default()
    }
}

impl Default for PendingQueue {
    fn default() -> Self {
        PendingQueue::new(DEFAULT_PENDING_CAPACITY)
    }
}

impl PendingBuffer for PendingQueue {
    fn buffer(&self, pending: PendingDatagram) {
        if self.capacity == 0 {
            net_debug!("no pending capacity, dropped datagram for {}", pending.next_hop);
            return;
        }

        let mut queue = self.queues
            .entry(pending.next_hop)
            .or_default();
        if queue.len() >= self.capacity {
            if let Some(evicted) = queue.pop_front() {
                net_debug!("pending queue for {} full, dropped datagram from {}",
                    evicted.next_hop, evicted.source);
            }
        }
        queue.push_back(pending);
    }

    fn flush(&self, next_hop: Ipv4Address) -> Vec<PendingDatagram> {
        self.take(next_hop)
    }

    fn abandon_all(&self, next_hop: Ipv4Address) -> Vec<PendingDatagram> {
        self.take(next_hop)
    }
}
