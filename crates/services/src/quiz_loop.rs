use std::sync::Arc;
use std::time::Duration;

use rand::rng;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use trivia_core::model::{AnswerId, Question, QuizOptions};
use trivia_core::{LoadFailure, QuizEffect, QuizState, derive_questions};

use crate::config::{DEFAULT_RESTART_DELAY, QuizConfig};
use crate::error::{LoadError, QuizLoopError};
use crate::source::{OpenTdbSource, QuestionSource};

/// Starts quiz loops backed by a shared question source.
#[derive(Clone)]
pub struct QuizLoopService {
    source: Arc<dyn QuestionSource>,
    options: QuizOptions,
    restart_delay: Duration,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, options: QuizOptions) -> Self {
        Self {
            source,
            options,
            restart_delay: DEFAULT_RESTART_DELAY,
        }
    }

    /// Service talking to Open Trivia DB as described by `config`.
    #[must_use]
    pub fn from_config(config: &QuizConfig) -> Self {
        let source = Arc::new(OpenTdbSource::new(config.api_url.clone()));
        Self::new(source, config.options).with_restart_delay(config.restart_delay)
    }

    #[must_use]
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    /// Spawn a loop on the current tokio runtime and kick off the first load.
    ///
    /// The loop stops on [`QuizHandle::cancel`] or once every handle is dropped.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn start(&self) -> QuizHandle {
        let state = QuizState::loading();
        let (snapshot_tx, snapshot_rx) = watch::channel(state.clone());
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let quiz_loop = QuizLoop {
            source: Arc::clone(&self.source),
            options: self.options,
            restart_delay: self.restart_delay,
            state,
            snapshots: snapshot_tx,
            commands: command_rx,
            event_tx,
            events: event_rx,
            generation: 0,
            pending: None,
        };
        tokio::spawn(quiz_loop.run());

        QuizHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        }
    }
}

//
// ─── HANDLE ────────────────────────────────────────────────────────────────────
//

enum Command {
    Select(AnswerId),
    Submit,
    Retry,
    Snapshot,
    Cancel,
}

struct Envelope {
    command: Command,
    reply: Option<oneshot::Sender<QuizState>>,
}

/// Command side of a running quiz loop.
///
/// Every command answers with the snapshot that results from it; the same
/// snapshots are also published to [`QuizHandle::subscribe`] receivers.
#[derive(Clone)]
pub struct QuizHandle {
    commands: mpsc::UnboundedSender<Envelope>,
    snapshots: watch::Receiver<QuizState>,
}

impl QuizHandle {
    /// Latest published snapshot, without a round trip to the loop.
    #[must_use]
    pub fn current(&self) -> QuizState {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every state change. Closed once the loop stops.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizState> {
        self.snapshots.clone()
    }

    /// # Errors
    ///
    /// Returns `QuizLoopError::Closed` after the loop has stopped.
    pub async fn select(&self, id: AnswerId) -> Result<QuizState, QuizLoopError> {
        self.request(Command::Select(id)).await
    }

    /// # Errors
    ///
    /// Returns `QuizLoopError::Closed` after the loop has stopped.
    pub async fn submit(&self) -> Result<QuizState, QuizLoopError> {
        self.request(Command::Submit).await
    }

    /// # Errors
    ///
    /// Returns `QuizLoopError::Closed` after the loop has stopped.
    pub async fn retry(&self) -> Result<QuizState, QuizLoopError> {
        self.request(Command::Retry).await
    }

    /// # Errors
    ///
    /// Returns `QuizLoopError::Closed` after the loop has stopped.
    pub async fn snapshot(&self) -> Result<QuizState, QuizLoopError> {
        self.request(Command::Snapshot).await
    }

    /// Stop the loop, aborting any in-flight load or pending restart.
    ///
    /// No state change is published afterwards. Safe to call more than once.
    pub fn cancel(&self) {
        let _ = self.commands.send(Envelope {
            command: Command::Cancel,
            reply: None,
        });
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    async fn request(&self, command: Command) -> Result<QuizState, QuizLoopError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Envelope {
                command,
                reply: Some(reply),
            })
            .map_err(|_| QuizLoopError::Closed)?;
        response.await.map_err(|_| QuizLoopError::Closed)
    }
}

//
// ─── LOOP ──────────────────────────────────────────────────────────────────────
//

enum Event {
    Loaded {
        generation: u64,
        result: Result<Vec<Question>, LoadError>,
    },
    RestartDue {
        generation: u64,
    },
}

/// Owns the round state. Loads and restart timers run as child tasks that report
/// back through `events`; `generation` discards reports from superseded tasks.
struct QuizLoop {
    source: Arc<dyn QuestionSource>,
    options: QuizOptions,
    restart_delay: Duration,
    state: QuizState,
    snapshots: watch::Sender<QuizState>,
    commands: mpsc::UnboundedReceiver<Envelope>,
    event_tx: mpsc::UnboundedSender<Event>,
    events: mpsc::UnboundedReceiver<Event>,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl QuizLoop {
    async fn run(mut self) {
        self.begin_load();

        loop {
            tokio::select! {
                envelope = self.commands.recv() => {
                    let Some(Envelope { command, reply }) = envelope else {
                        debug!("all quiz handles dropped");
                        break;
                    };
                    let stop = matches!(command, Command::Cancel);
                    self.handle(command);
                    if let Some(reply) = reply {
                        let _ = reply.send(self.state.clone());
                    }
                    if stop {
                        break;
                    }
                }
                Some(event) = self.events.recv() => self.on_event(event),
            }
        }

        self.abort_pending();
        debug!("quiz loop stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Select(id) => {
                let next = self.state.select(id);
                if next == self.state {
                    debug!(answer = %id, "selection ignored");
                }
                self.publish(next);
            }
            Command::Submit => {
                let was_revealed = self.state.is_revealed();
                let (next, effect) = self.state.submit();
                if !was_revealed && next.is_revealed() {
                    info!(
                        score = next.score(),
                        total = next.questions().len(),
                        round = next.round(),
                        "round revealed"
                    );
                }
                self.publish(next);
                self.run_effect(effect);
            }
            Command::Retry => {
                let (next, effect) = self.state.retry();
                self.publish(next);
                self.run_effect(effect);
            }
            Command::Snapshot => {}
            Command::Cancel => {
                info!("quiz loop cancelled");
                self.abort_pending();
            }
        }
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Loaded { generation, result } if generation == self.generation => {
                self.pending = None;
                let next = match result {
                    Ok(questions) if questions.is_empty() => {
                        warn!("trivia source returned an empty batch");
                        self.state.on_loaded(questions)
                    }
                    Ok(questions) => {
                        info!(count = questions.len(), "trivia round ready");
                        self.state.on_loaded(questions)
                    }
                    Err(err) => {
                        warn!(error = %err, "trivia load failed");
                        self.state.on_load_failed(LoadFailure::new(err.to_string()))
                    }
                };
                self.publish(next);
            }
            Event::RestartDue { generation } if generation == self.generation => {
                self.pending = None;
                self.begin_load();
            }
            _ => debug!("dropping stale quiz event"),
        }
    }

    fn run_effect(&mut self, effect: QuizEffect) {
        match effect {
            QuizEffect::None => {}
            QuizEffect::Load => self.begin_load(),
            QuizEffect::ScheduleRestart => self.schedule_restart(),
        }
    }

    fn begin_load(&mut self) {
        let generation = self.next_generation();
        let source = Arc::clone(&self.source);
        let options = self.options;
        let events = self.event_tx.clone();

        info!(
            amount = options.amount(),
            difficulty = %options.difficulty(),
            "loading trivia round"
        );
        self.pending = Some(tokio::spawn(async move {
            let result = source
                .fetch(&options)
                .await
                .map(|raw| derive_questions(&raw, &mut rng()));
            let _ = events.send(Event::Loaded { generation, result });
        }));
    }

    fn schedule_restart(&mut self) {
        let generation = self.next_generation();
        let delay = self.restart_delay;
        let events = self.event_tx.clone();

        debug!(delay_ms = delay.as_millis(), "restart scheduled");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(Event::RestartDue { generation });
        }));
    }

    fn next_generation(&mut self) -> u64 {
        self.abort_pending();
        self.generation += 1;
        self.generation
    }

    fn abort_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    fn publish(&mut self, next: QuizState) {
        if next != self.state {
            self.state = next;
            self.snapshots.send_replace(self.state.clone());
        }
    }
}
