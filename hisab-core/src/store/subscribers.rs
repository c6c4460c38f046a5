use crate::record::Entry;
use anyhow::{Result, anyhow};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

/// Listeners of a store. Each gets whole snapshots, never deltas.
#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Mutex<Vec<Sender<Vec<Entry>>>>,
}

impl Subscribers {
    /// Registers a listener and hands it `initial` straight away.
    pub(crate) fn add(&self, initial: Vec<Entry>) -> Result<Receiver<Vec<Entry>>> {
        let (tx, rx) = mpsc::channel();
        // The receiver is still in hand, so this send cannot fail.
        let _ = tx.send(initial);
        self.lock()?.push(tx);
        Ok(rx)
    }

    /// Sends `snapshot` to every listener, dropping those that went away.
    pub(crate) fn notify(&self, snapshot: &[Entry]) -> Result<()> {
        let mut senders = self.lock()?;
        senders.retain(|tx| tx.send(snapshot.to_vec()).is_ok());
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Sender<Vec<Entry>>>>> {
        self.senders
            .lock()
            .map_err(|_| anyhow!("store subscriber list is poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_receivers_are_pruned() {
        let subs = Subscribers::default();
        let kept = subs.add(Vec::new()).unwrap();
        let dropped = subs.add(Vec::new()).unwrap();
        drop(dropped);

        subs.notify(&[]).unwrap();
        assert_eq!(subs.senders.lock().unwrap().len(), 1);
        assert_eq!(kept.try_iter().count(), 2);
    }
}
