//! Single-assignment data slots connecting job outputs to job inputs.
//!
//! A [`Varying`] is a cheap shared handle to a value produced by exactly
//! one job and read by any number of downstream jobs. The graph topology
//! guarantees write-before-read; violating it is a wiring bug, so both an
//! unwritten read and a second write panic with the slot name.

use std::cell::RefCell;
use std::rc::Rc;

/// Readable view over a varying's value.
trait Source<T> {
    fn read(&self) -> T;
    fn name(&self) -> &str;
}

/// The writable backing store of a varying.
///
/// Jobs hold the slot for their output; everything downstream only sees
/// the read-only [`Varying`] handle.
pub(crate) struct Slot<T> {
    name: String,
    cell: RefCell<Option<T>>,
}

impl<T> Slot<T> {
    pub(crate) fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            cell: RefCell::new(None),
        })
    }

    /// Publish the value. Exactly once per bake.
    pub(crate) fn write(&self, value: T) {
        let mut cell = self.cell.borrow_mut();
        if cell.is_some() {
            panic!("varying '{}' written twice", self.name);
        }
        *cell = Some(value);
    }
}

impl<T: Clone> Source<T> for Slot<T> {
    fn read(&self) -> T {
        self.cell
            .borrow()
            .as_ref()
            .unwrap_or_else(|| panic!("varying '{}' read before it was written", self.name))
            .clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A derived read-only view over another varying.
struct MapSource<U, T> {
    name: String,
    parent: Varying<U>,
    project: Box<dyn Fn(&U) -> T>,
}

impl<U: Clone + 'static, T> Source<T> for MapSource<U, T> {
    fn read(&self) -> T {
        let value = self.parent.get();
        (self.project)(&value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Shared handle to a single-assignment value flowing through the graph.
pub struct Varying<T> {
    source: Rc<dyn Source<T>>,
}

impl<T> Clone for Varying<T> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
        }
    }
}

impl<T: Clone + 'static> Varying<T> {
    pub(crate) fn from_slot(slot: Rc<Slot<T>>) -> Self {
        Self { source: slot }
    }

    /// Read the value. Panics if the producing job has not run yet.
    pub fn get(&self) -> T {
        self.source.read()
    }

    /// Diagnostic name of the underlying slot.
    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Derive a read-only view, e.g. one member of a multi-value output.
    pub fn map<U>(&self, project: impl Fn(&T) -> U + 'static) -> Varying<U>
    where
        U: Clone + 'static,
    {
        Varying {
            source: Rc::new(MapSource {
                name: format!("{}.map", self.name()),
                parent: self.clone(),
                project: Box::new(project),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let slot = Slot::new("value");
        let varying = Varying::from_slot(Rc::clone(&slot));
        slot.write(7u32);
        assert_eq!(varying.get(), 7);
        assert_eq!(varying.get(), 7);
    }

    #[test]
    #[should_panic(expected = "read before it was written")]
    fn test_read_before_write_panics() {
        let slot: Rc<Slot<u32>> = Slot::new("early");
        Varying::from_slot(slot).get();
    }

    #[test]
    #[should_panic(expected = "written twice")]
    fn test_double_write_panics() {
        let slot = Slot::new("twice");
        slot.write(1u32);
        slot.write(2u32);
    }

    #[test]
    fn test_map_projects_member() {
        let slot = Slot::new("pair");
        let varying = Varying::from_slot(Rc::clone(&slot));
        let first = varying.map(|pair: &(u32, String)| pair.0);
        let second = varying.map(|pair: &(u32, String)| pair.1.clone());
        slot.write((3, "three".to_string()));
        assert_eq!(first.get(), 3);
        assert_eq!(second.get(), "three");
    }
}
