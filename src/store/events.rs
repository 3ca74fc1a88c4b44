use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

pub const CART_UPDATED: &str = "cartUpdated";

const CHANNEL_CAPACITY: usize = 16;

/// The `cartUpdated` bus. Pulses carry no data; listeners re-read the store.
#[derive(Debug, Clone)]
pub struct CartEvents {
    sender: broadcast::Sender<()>,
}

impl Default for CartEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl CartEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn emit(&self) {
        // No listeners mounted is fine.
        let delivered = self.sender.send(()).unwrap_or(0);
        tracing::trace!(event = CART_UPDATED, listeners = delivered, "emitted");
    }

    /// Mount a listener. Dropping the subscription unmounts it.
    pub fn subscribe(&self) -> CartSubscription {
        CartSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[derive(Debug)]
pub struct CartSubscription {
    receiver: broadcast::Receiver<()>,
}

impl CartSubscription {
    /// Waits for the next pulse. Returns `false` once the bus is gone.
    pub async fn changed(&mut self) -> bool {
        match self.receiver.recv().await {
            Ok(()) => true,
            // Missed pulses collapse into one invalidation.
            Err(RecvError::Lagged(_)) => true,
            Err(RecvError::Closed) => false,
        }
    }

    /// Drains pending pulses without waiting; `true` if at least one arrived.
    pub fn try_changed(&mut self) -> bool {
        let mut seen = false;
        loop {
            match self.receiver.try_recv() {
                Ok(()) | Err(TryRecvError::Lagged(_)) => seen = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return seen,
            }
        }
    }
}
