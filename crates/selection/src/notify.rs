use std::sync::mpsc::{self, Receiver, Sender};

use tracing::warn;

/// Fan-out list of event subscribers backed by unbounded channels.
#[derive(Debug)]
pub struct Subscribers<T> {
    senders: Vec<Sender<T>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            senders: Vec::new(),
        }
    }
}

impl<T> Subscribers<T>
where
    T: Clone,
{
    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&mut self) -> Receiver<T> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Sends `items` in order to every live subscriber.
    ///
    /// Subscribers whose receiver was dropped are removed.
    pub fn publish(&mut self, items: &[T]) {
        if items.is_empty() {
            return;
        }
        let before = self.senders.len();
        self.senders
            .retain(|sender| items.iter().all(|item| sender.send(item.clone()).is_ok()));
        let pruned = before - self.senders.len();
        if pruned > 0 {
            warn!(pruned, remaining = self.senders.len(), "dropped closed subscribers");
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.senders.len()
    }
}
