//! Composite graph nodes: ordered lists of runnable jobs.

use std::rc::Rc;

use super::job::{BakeContext, Job, JobInput};
use super::varying::{Slot, Varying};

/// A graph description: wires jobs into a [`Task`] at construction time.
///
/// `build` is called exactly once. Jobs are added in dependency order;
/// because a job can only be wired to varyings that already exist, the
/// registration order is a valid topological order and cycles are
/// structurally impossible.
pub trait TaskGraph {
    /// The graph's external input value.
    type Input: Clone + 'static;
    /// The graph's final output value.
    type Output: Clone + 'static;

    /// Add this graph's jobs to `task`, consuming `input` and returning
    /// the varying that will hold the final output.
    fn build(task: &mut Task, input: Varying<Self::Input>) -> Varying<Self::Output>;
}

/// One type-erased runnable node of a task.
struct TaskNode {
    name: String,
    run: Box<dyn FnMut(&mut BakeContext)>,
}

/// An ordered list of jobs executed synchronously, in registration order.
pub struct Task {
    name: String,
    nodes: Vec<TaskNode>,
}

impl Task {
    /// Create an empty task.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Diagnostic name of this task.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of nodes registered so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no nodes have been registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Instantiate `J`, wire `input` to it, and return the varying that
    /// will carry its output.
    pub fn add_job<J>(
        &mut self,
        name: impl Into<String>,
        input: impl JobInput<J::Input> + 'static,
    ) -> Varying<J::Output>
    where
        J: Job + 'static,
        J::Output: Clone + 'static,
    {
        let name = name.into();
        let slot = Slot::new(format!("{}.{}", self.name, name));
        let output = Varying::from_slot(Rc::clone(&slot));

        let mut job = J::default();
        self.nodes.push(TaskNode {
            name,
            run: Box::new(move |context| {
                let input_value = input.fetch();
                let mut output_value = J::Output::default();
                job.run(context, &input_value, &mut output_value);
                slot.write(output_value);
            }),
        });

        output
    }

    /// Nest a composite graph as a single node of this task.
    pub fn add_task<G>(
        &mut self,
        name: impl Into<String>,
        input: Varying<G::Input>,
    ) -> Varying<G::Output>
    where
        G: TaskGraph,
    {
        let name = name.into();
        let mut subtask = Task::new(format!("{}.{}", self.name, name));
        let output = G::build(&mut subtask, input);
        self.nodes.push(TaskNode {
            name,
            run: Box::new(move |context| subtask.run(context)),
        });
        output
    }

    /// Run every node, in registration order.
    pub fn run(&mut self, context: &mut BakeContext) {
        for node in &mut self.nodes {
            log::trace!("running node '{}'", node.name);
            (node.run)(context);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct AddOne;

    impl Job for AddOne {
        type Input = u32;
        type Output = u32;

        fn run(&mut self, _context: &mut BakeContext, input: &u32, output: &mut u32) {
            *output = input + 1;
        }
    }

    #[derive(Default)]
    struct Sum;

    impl Job for Sum {
        type Input = (u32, u32);
        type Output = u32;

        fn run(&mut self, _context: &mut BakeContext, input: &(u32, u32), output: &mut u32) {
            *output = input.0 + input.1;
        }
    }

    struct Chain;

    impl TaskGraph for Chain {
        type Input = u32;
        type Output = u32;

        fn build(task: &mut Task, input: Varying<u32>) -> Varying<u32> {
            let a = task.add_job::<AddOne>("First", input.clone());
            let b = task.add_job::<AddOne>("Second", a.clone());
            task.add_job::<Sum>("Sum", (a, b))
        }
    }

    #[test]
    fn test_jobs_run_in_registration_order() {
        let slot = Slot::new("input");
        let input = Varying::from_slot(Rc::clone(&slot));

        let mut task = Task::new("chain");
        let output = Chain::build(&mut task, input);
        assert_eq!(task.len(), 3);

        slot.write(10u32);
        let mut context = BakeContext::new();
        task.run(&mut context);

        // (10+1) + (10+1+1) = 23
        assert_eq!(output.get(), 23);
        assert!(!context.has_errors());
    }

    #[test]
    fn test_nested_task() {
        let slot = Slot::new("input");
        let input = Varying::from_slot(Rc::clone(&slot));

        let mut task = Task::new("outer");
        let inner_out = task.add_task::<Chain>("Inner", input);
        let output = task.add_job::<AddOne>("After", inner_out);

        slot.write(1u32);
        let mut context = BakeContext::new();
        task.run(&mut context);
        assert_eq!(output.get(), 6);
    }

    #[test]
    fn test_error_channel_collects_in_order() {
        #[derive(Default)]
        struct Complain;

        impl Job for Complain {
            type Input = u32;
            type Output = u32;

            fn run(&mut self, context: &mut BakeContext, input: &u32, output: &mut u32) {
                context.report_error(format!("complaint {input}"));
                *output = *input;
            }
        }

        let slot = Slot::new("input");
        let input = Varying::from_slot(Rc::clone(&slot));

        let mut task = Task::new("grumpy");
        let mid = task.add_job::<Complain>("A", input);
        task.add_job::<Complain>("B", mid);

        slot.write(5u32);
        let mut context = BakeContext::new();
        task.run(&mut context);

        assert_eq!(context.errors(), ["complaint 5", "complaint 5"]);
    }
}
