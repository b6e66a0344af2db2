//! The task-graph engine.
//!
//! The engine is a small data-flow machine: [`Varying`] slots carry typed,
//! single-assignment values between [`Job`]s; a [`Task`] is an ordered job
//! list wired by a [`TaskGraph`]; an [`Engine`] owns one root task and
//! drives a single synchronous execution.
//!
//! Wiring is statically type-checked: `add_job` only accepts varyings (or
//! tuples of varyings) whose value types match the job's declared input.
//! Execution order is registration order, which the wiring rules make a
//! valid topological order.
//!
//! # Example
//!
//! ```ignore
//! struct Double;
//! impl TaskGraph for Double { /* wire jobs */ }
//!
//! let mut engine: Engine<Double> = Engine::new("Double");
//! engine.feed_input(21);
//! engine.run();
//! assert_eq!(engine.output(), 42);
//! ```

mod job;
mod task;
mod varying;

pub use job::{BakeContext, Job, JobInput};
pub use task::{Task, TaskGraph};
pub use varying::Varying;

use std::rc::Rc;

use varying::Slot;

/// Owns a root task and drives one bake through it.
///
/// One-shot semantics: feed the input once, run once, read the output.
/// The single-assignment slots make a second run a programming error.
pub struct Engine<G: TaskGraph> {
    context: BakeContext,
    input: Rc<Slot<G::Input>>,
    output: Varying<G::Output>,
    task: Task,
}

impl<G: TaskGraph> Engine<G> {
    /// Build the graph once and prepare it for execution.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let input_slot = Slot::new(format!("{name}.input"));
        let input = Varying::from_slot(Rc::clone(&input_slot));

        let mut task = Task::new(name);
        let output = G::build(&mut task, input);

        Self {
            context: BakeContext::new(),
            input: input_slot,
            output,
            task,
        }
    }

    /// Write the engine's external input slot.
    pub fn feed_input(&mut self, value: G::Input) {
        self.input.write(value);
    }

    /// Execute the whole graph synchronously on the calling thread.
    pub fn run(&mut self) {
        log::debug!(
            "running graph '{}' ({} nodes)",
            self.task.name(),
            self.task.len()
        );
        self.task.run(&mut self.context);
    }

    /// Read the root task's output. Only valid after [`Engine::run`].
    pub fn output(&self) -> G::Output {
        self.output.get()
    }

    /// The per-bake context, including any reported errors.
    pub fn context(&self) -> &BakeContext {
        &self.context
    }
}
