use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

pub type SubscriptionId = u64;

/// Fan-out of change notifications to any number of receivers.
///
/// Receivers that were dropped are pruned on the next publish.
#[derive(Debug)]
pub struct Subscribers<E> {
    next_id: SubscriptionId,
    senders: Vec<(SubscriptionId, UnboundedSender<E>)>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            next_id: 1,
            senders: Vec::new(),
        }
    }
}

impl<E: Clone> Subscribers<E> {
    pub fn subscribe(&mut self) -> (SubscriptionId, UnboundedReceiver<E>) {
        let (tx, rx) = unbounded_channel();
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.senders.push((id, tx));
        (id, rx)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.senders.len();
        self.senders.retain(|(existing, _)| *existing != id);
        self.senders.len() != before
    }

    pub fn publish(&mut self, event: E) -> usize {
        self.senders
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
        self.senders.len()
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
