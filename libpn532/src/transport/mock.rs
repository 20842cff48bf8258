// libpn532/src/transport/mock.rs

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::TransportError;
use crate::transport::traits::Transport;
use crate::types::TransportKind;

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<Vec<u8>>,
    responses: VecDeque<Vec<u8>>,
    receive_failures: usize,
    send_failures: usize,
    connected: bool,
    connects: usize,
    disconnects: usize,
    input_clears: usize,
}

/// Mock transport for tests. It records sent payloads and returns queued
/// responses. Clones share state, so a test can keep a handle after the
/// session takes ownership.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Connected-less mock with no scripted answers.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A test that panicked while holding the lock already failed.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue bytes for the next `receive`.
    pub fn push_response(&self, resp: Vec<u8>) {
        self.lock().responses.push_back(resp);
    }

    /// Make the next `n` receive calls time out even if responses are queued.
    pub fn set_receive_failures(&self, n: usize) {
        self.lock().receive_failures = n;
    }

    /// Make the next `n` send calls fail with an I/O error.
    pub fn set_send_failures(&self, n: usize) {
        self.lock().send_failures = n;
    }

    /// Every buffer passed to `send`, oldest first.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.lock().sent.clone()
    }

    /// Take the most recent sent buffer.
    pub fn pop_sent(&self) -> Option<Vec<u8>> {
        self.lock().sent.pop()
    }

    /// Scripted answers not yet consumed.
    pub fn pending_responses(&self) -> usize {
        self.lock().responses.len()
    }

    /// True between `connect` and `disconnect`.
    pub fn is_connected(&self) -> bool {
        self.lock().connected
    }

    /// Successful `connect` calls.
    pub fn connect_count(&self) -> usize {
        self.lock().connects
    }

    /// `disconnect` calls.
    pub fn disconnect_count(&self) -> usize {
        self.lock().disconnects
    }

    /// Number of `clear_input` calls. Queued responses are the script of
    /// what the reader sends next, so clearing input leaves them in place.
    pub fn input_clear_count(&self) -> usize {
        self.lock().input_clears
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Mock
    }

    async fn connect(&mut self) -> Result<(), TransportError> {
        let mut st = self.lock();
        st.connected = true;
        st.connects += 1;
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let mut st = self.lock();
        if !st.connected {
            return Err(TransportError::NotConnected);
        }
        if st.send_failures > 0 {
            st.send_failures -= 1;
            return Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "injected send failure",
            )));
        }
        st.sent.push(data.to_vec());
        Ok(())
    }

    async fn clear_input(&mut self) -> Result<(), TransportError> {
        let mut st = self.lock();
        if !st.connected {
            return Err(TransportError::NotConnected);
        }
        st.input_clears += 1;
        Ok(())
    }

    async fn receive(&mut self, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let next = {
            let mut st = self.lock();
            if !st.connected {
                return Err(TransportError::NotConnected);
            }
            if st.receive_failures > 0 {
                st.receive_failures -= 1;
                None
            } else {
                st.responses.pop_front()
            }
        };

        match next {
            Some(resp) => Ok(resp),
            None => {
                // Behave like a silent reader: wait out the timeout.
                tokio::time::sleep(timeout).await;
                Err(TransportError::Timeout)
            }
        }
    }

    async fn disconnect(&mut self) -> Result<(), TransportError> {
        let mut st = self.lock();
        if st.connected {
            st.connected = false;
            st.disconnects += 1;
        }
        Ok(())
    }
}
