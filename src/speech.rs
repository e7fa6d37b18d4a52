//! Read-aloud sessions.
//!
//! Synthesis blocks, so every session runs its utterance on a worker thread.
//! The worker never touches pane state: it reports back over a channel that
//! the UI thread drains, and each report carries the id of the session that
//! produced it so a late report from a stopped session can be dropped.

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use crate::config::SpeechConfig;
use crate::error::{AppError, Result};

/// Cancellation flag shared between a session's owner and its worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn same(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A text-to-speech backend.
pub trait SpeechEngine: Send + Sync {
    /// Speak `text`, returning once it has been spoken, or early once `cancel`
    /// is set and [`stop`](Self::stop) is called.
    ///
    /// Must not begin speaking if `cancel` is already set.
    fn speak(&self, text: &str, cancel: &CancelToken) -> Result<()>;

    /// Abort the utterance in progress, if any. Callable from any thread.
    fn stop(&self);
}

const CHILD_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Speaks by running an external synthesiser such as `espeak-ng`.
pub struct CommandEngine {
    config: SpeechConfig,
    running: Mutex<Option<(CancelToken, Child)>>,
}

impl CommandEngine {
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            config,
            running: Mutex::new(None),
        }
    }

    fn running(&self) -> MutexGuard<'_, Option<(CancelToken, Child)>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SpeechEngine for CommandEngine {
    fn speak(&self, text: &str, cancel: &CancelToken) -> Result<()> {
        let stdin = {
            // Checked under the lock so a concurrent stop() either sees the
            // child or prevents it from being spawned.
            let mut running = self.running();
            if cancel.is_cancelled() {
                return Ok(());
            }
            let mut child = Command::new(&self.config.program)
                .args(&self.config.args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map_err(|e| AppError::Speech {
                    message: format!("could not start '{}': {}", self.config.program, e),
                })?;
            let stdin = child.stdin.take();
            *running = Some((cancel.clone(), child));
            stdin
        };

        // Written outside the lock so stop() can kill a child that stalls
        // reading. Dropping the pipe closes it.
        if let Some(mut stdin) = stdin {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                if cancel.is_cancelled() {
                    return Ok(());
                }
                log::debug!("Speech process stopped reading its input: {}", e);
            }
        }

        loop {
            {
                let mut running = self.running();
                let status = match running.as_mut() {
                    Some((token, child)) if token.same(cancel) => child.try_wait(),
                    // stop() took our child away
                    _ => return Ok(()),
                };
                match status {
                    Ok(Some(status)) => {
                        running.take();
                        if status.success() || cancel.is_cancelled() {
                            return Ok(());
                        }
                        return Err(AppError::Speech {
                            message: format!("'{}' exited with {}", self.config.program, status),
                        });
                    }
                    Ok(None) => {}
                    Err(e) => {
                        running.take();
                        return Err(AppError::Speech { message: e.to_string() });
                    }
                }
            }
            thread::sleep(CHILD_POLL_INTERVAL);
        }
    }

    fn stop(&self) {
        if let Some((_, mut child)) = self.running().take() {
            if let Err(e) = child.kill() {
                log::debug!("Speech process already gone: {}", e);
            }
            let _ = child.wait();
        }
    }
}

/// Identifies one read-aloud session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechState {
    Idle,
    Active(SessionId),
}

/// Sent from a worker thread when its utterance ends.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Finished(SessionId),
    Failed(SessionId, AppError),
}

impl SpeechEvent {
    pub fn session(&self) -> SessionId {
        match self {
            SpeechEvent::Finished(id) | SpeechEvent::Failed(id, _) => *id,
        }
    }
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Owns the speech engine and at most one active session.
pub struct Narrator {
    engine: Arc<dyn SpeechEngine>,
    state: SpeechState,
    cancel: CancelToken,
    next_session: u64,
    events_tx: Sender<SpeechEvent>,
    events_rx: Receiver<SpeechEvent>,
    waker: Option<Waker>,
}

impl Narrator {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            engine,
            state: SpeechState::Idle,
            cancel: CancelToken::new(),
            next_session: 1,
            events_tx,
            events_rx,
            waker: None,
        }
    }

    /// Called from the worker after it posts an event, so the UI wakes up to drain it.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    pub fn state(&self) -> SpeechState {
        self.state
    }

    pub fn is_reading(&self) -> bool {
        matches!(self.state, SpeechState::Active(_))
    }

    /// Start speaking `text`, stopping any session already in progress.
    pub fn start(&mut self, text: String) -> Result<SessionId> {
        self.stop();

        let id = SessionId(self.next_session);
        self.next_session += 1;

        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        let engine = Arc::clone(&self.engine);
        let tx = self.events_tx.clone();
        let waker = self.waker.clone();

        thread::Builder::new()
            .name(format!("speech-{}", id.0))
            .spawn(move || {
                let event = match engine.speak(&text, &worker_cancel) {
                    Ok(()) => SpeechEvent::Finished(id),
                    Err(e) => SpeechEvent::Failed(id, e),
                };
                // The narrator may already be gone on shutdown.
                let _ = tx.send(event);
                if let Some(waker) = waker {
                    waker();
                }
            })
            .map_err(|e| AppError::Speech {
                message: format!("could not start speech worker: {}", e),
            })?;

        log::info!("Speech session {} started", id.0);
        self.state = SpeechState::Active(id);
        self.cancel = cancel;
        Ok(id)
    }

    /// Stop the active session. Returns false if nothing was being read.
    pub fn stop(&mut self) -> bool {
        match self.state {
            SpeechState::Active(id) => {
                self.state = SpeechState::Idle;
                self.cancel.cancel();
                self.engine.stop();
                log::info!("Speech session {} stopped", id.0);
                true
            }
            SpeechState::Idle => false,
        }
    }

    /// Apply every pending worker report. Returns failures of the active session.
    pub fn process_events(&mut self) -> Vec<AppError> {
        let mut errors = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            if let Some(error) = self.apply(event) {
                errors.push(error);
            }
        }
        errors
    }

    /// Block up to `timeout` for the next worker report and apply it.
    pub fn wait_for_event(&mut self, timeout: Duration) -> Option<SpeechEvent> {
        match self.events_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.apply(event.clone());
                Some(event)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn apply(&mut self, event: SpeechEvent) -> Option<AppError> {
        let id = event.session();
        if self.state != SpeechState::Active(id) {
            log::debug!("Ignoring completion of stale speech session {}", id.0);
            return None;
        }

        self.state = SpeechState::Idle;
        match event {
            SpeechEvent::Finished(_) => {
                log::info!("Speech session {} finished", id.0);
                None
            }
            SpeechEvent::Failed(_, error) => {
                log::warn!("Speech session {} failed: {}", id.0, error);
                Some(error)
            }
        }
    }
}

impl Drop for Narrator {
    fn drop(&mut self) {
        self.stop();
    }
}
