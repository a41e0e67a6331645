//! Single-threaded driver around a [`GameState`].
//!
//! Player commands and clock ticks share one FIFO queue, so every mutation of
//! the state happens in the order its input arrived. A front end pushes
//! commands as keys come in, feeds wall-clock time through [`GameLoop::advance`]
//! and drains everything with [`GameLoop::run_pending`] once per frame.

use std::collections::VecDeque;

use crate::clock::FrameClock;
use crate::core::{GameSnapshot, GameState, PieceSource, UniformSource};
use crate::types::{Command, CoreEvent};

/// One queued input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopInput {
    Command(Command),
    /// Elapsed time in milliseconds
    Tick(u32),
}

/// What one `run_pending` call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub commands: usize,
    pub ticks: usize,
    /// At least one input changed the state
    pub changed: bool,
}

#[derive(Debug)]
pub struct GameLoop<S = UniformSource> {
    state: GameState<S>,
    queue: VecDeque<LoopInput>,
    clock: FrameClock,
}

impl GameLoop<UniformSource> {
    pub fn new(seed: u32) -> Self {
        Self::with_state(GameState::new(seed))
    }
}

impl<S: PieceSource> GameLoop<S> {
    pub fn with_state(state: GameState<S>) -> Self {
        Self {
            state,
            queue: VecDeque::new(),
            clock: FrameClock::default(),
        }
    }

    /// Replace the default 16ms step
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &GameState<S> {
        &self.state
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn push(&mut self, input: LoopInput) {
        self.queue.push_back(input);
    }

    pub fn push_command(&mut self, command: Command) {
        self.push(LoopInput::Command(command));
    }

    pub fn push_tick(&mut self, elapsed_ms: u32) {
        self.push(LoopInput::Tick(elapsed_ms));
    }

    /// Feed wall-clock time and queue one fixed-step tick per whole step.
    ///
    /// Returns the number of ticks queued.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let steps = self.clock.advance(elapsed_ms);
        let step_ms = self.clock.step_ms();
        for _ in 0..steps {
            self.push_tick(step_ms);
        }
        steps
    }

    /// Apply every queued input in arrival order.
    pub fn run_pending(&mut self) -> RunReport {
        let mut report = RunReport::default();
        while let Some(input) = self.queue.pop_front() {
            let changed = match input {
                LoopInput::Command(command) => {
                    report.commands += 1;
                    if command == Command::Reset {
                        self.clock.reset();
                    }
                    self.state.dispatch(command)
                }
                LoopInput::Tick(elapsed_ms) => {
                    report.ticks += 1;
                    self.state.tick(elapsed_ms)
                }
            };
            report.changed |= changed;
        }
        report
    }

    /// Queue and immediately apply a batch of inputs
    pub fn run_inputs<I>(&mut self, inputs: I) -> RunReport
    where
        I: IntoIterator<Item = LoopInput>,
    {
        self.queue.extend(inputs);
        self.run_pending()
    }

    pub fn take_events(&mut self) -> Vec<CoreEvent> {
        self.state.take_events()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }
}

impl Default for GameLoop<UniformSource> {
    fn default() -> Self {
        Self::new(1)
    }
}
