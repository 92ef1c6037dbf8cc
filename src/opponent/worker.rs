use std::sync::{mpsc, Arc};
use std::time::Duration;

use tracing::debug;

use super::Opponent;
use crate::error::OpponentError;

/// A finished opponent request, tagged with the game it was made for.
#[derive(Debug)]
pub struct FetchResult {
    pub generation: u64,
    pub history: Vec<usize>,
    pub result: Result<usize, OpponentError>,
}

/// Runs opponent requests off the UI thread and hands results back over a
/// channel.
pub struct OpponentWorker {
    opponent: Arc<dyn Opponent>,
    tx: mpsc::Sender<FetchResult>,
    rx: mpsc::Receiver<FetchResult>,
}

impl OpponentWorker {
    pub fn new(opponent: Arc<dyn Opponent>) -> Self {
        let (tx, rx) = mpsc::channel();
        OpponentWorker { opponent, tx, rx }
    }

    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    /// Start a request for the move after `history`.
    pub fn dispatch(&self, generation: u64, history: Vec<usize>) {
        let opponent = Arc::clone(&self.opponent);
        let tx = self.tx.clone();
        debug!(generation, moves = history.len(), "requesting opponent move");
        std::thread::spawn(move || {
            let result = opponent.suggest_move(&history);
            // The receiver only goes away when the session is dropped.
            let _ = tx.send(FetchResult {
                generation,
                history,
                result,
            });
        });
    }

    /// Next finished request, if one is ready.
    pub fn try_recv(&self) -> Option<FetchResult> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next finished request.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchResult> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Opponent for Echo {
        fn suggest_move(&self, history: &[usize]) -> Result<usize, OpponentError> {
            history.first().copied().ok_or(OpponentError::EmptyResponse)
        }

        fn name(&self) -> &str {
            "Echo"
        }
    }

    #[test]
    fn test_dispatch_delivers_tagged_result() {
        let worker = OpponentWorker::new(Arc::new(Echo));
        worker.dispatch(3, vec![2, 1]);
        let fetched = worker
            .recv_timeout(Duration::from_secs(5))
            .expect("worker should answer");
        assert_eq!(fetched.generation, 3);
        assert_eq!(fetched.history, vec![2, 1]);
        assert_eq!(fetched.result.unwrap(), 2);
    }

    #[test]
    fn test_errors_are_delivered() {
        let worker = OpponentWorker::new(Arc::new(Echo));
        worker.dispatch(0, Vec::new());
        let fetched = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(fetched.result, Err(OpponentError::EmptyResponse)));
    }

    #[test]
    fn test_try_recv_empty() {
        let worker = OpponentWorker::new(Arc::new(Echo));
        assert!(worker.try_recv().is_none());
        assert_eq!(worker.opponent_name(), "Echo");
    }
}
