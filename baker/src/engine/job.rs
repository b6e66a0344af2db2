//! The job contract and the per-bake context.

use super::varying::Varying;

/// Per-bake state shared by every job in a graph.
///
/// Jobs do not abort the graph on bad input; they produce empty/default
/// outputs and leave a human-readable message here. The driver decides
/// what an accumulated error list means (exit code, error file).
#[derive(Debug, Default)]
pub struct BakeContext {
    errors: Vec<String>,
}

impl BakeContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a bake error without stopping the graph.
    pub fn report_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("bake error: {message}");
        self.errors.push(message);
    }

    /// Messages reported so far, in order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Whether any job reported an error.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A typed unit of work in the bake graph.
///
/// `run` must be a pure transformation: all observable effects go through
/// `output` (or the context's error channel). It is invoked exactly once
/// per engine run, after every varying feeding `input` has been written.
pub trait Job: Default {
    /// Value consumed by this job (a tuple for multi-input jobs).
    type Input;
    /// Value produced by this job. The default value doubles as the
    /// "failed, downstream must cope" result.
    type Output: Default;

    /// Transform `input` into `output`.
    fn run(&mut self, context: &mut BakeContext, input: &Self::Input, output: &mut Self::Output);
}

/// Wires one or more upstream varyings to a job's input type.
///
/// Implemented for a single [`Varying`] and for tuples of up to five, so
/// graph wiring stays statically type-checked: `add_job` only accepts
/// handle combinations whose value types match the job's `Input` exactly.
pub trait JobInput<T> {
    /// Clone the current values out of the wired slots.
    fn fetch(&self) -> T;
}

impl<A: Clone + 'static> JobInput<A> for Varying<A> {
    fn fetch(&self) -> A {
        self.get()
    }
}

impl<A, B> JobInput<(A, B)> for (Varying<A>, Varying<B>)
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    fn fetch(&self) -> (A, B) {
        (self.0.get(), self.1.get())
    }
}

impl<A, B, C> JobInput<(A, B, C)> for (Varying<A>, Varying<B>, Varying<C>)
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    fn fetch(&self) -> (A, B, C) {
        (self.0.get(), self.1.get(), self.2.get())
    }
}

impl<A, B, C, D> JobInput<(A, B, C, D)> for (Varying<A>, Varying<B>, Varying<C>, Varying<D>)
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    D: Clone + 'static,
{
    fn fetch(&self) -> (A, B, C, D) {
        (self.0.get(), self.1.get(), self.2.get(), self.3.get())
    }
}

impl<A, B, C, D, E> JobInput<(A, B, C, D, E)>
    for (Varying<A>, Varying<B>, Varying<C>, Varying<D>, Varying<E>)
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    D: Clone + 'static,
    E: Clone + 'static,
{
    fn fetch(&self) -> (A, B, C, D, E) {
        (
            self.0.get(),
            self.1.get(),
            self.2.get(),
            self.3.get(),
            self.4.get(),
        )
    }
}
