/*!

The state container for a single run.

A `Context` owns the run's [`Parameters`] and a set of typed data plugins. A data plugin is any
`'static` type that knows how to build its own empty value; the context creates it on first
mutable access and hands out references by type afterwards. The simulation keeps its
[`InfectionHistory`](crate::history::InfectionHistory),
[`RunningTotals`](crate::history::RunningTotals) and the list of daily records this way, so all
mutable run state lives in one place that the loop owns exclusively.

```rust
# use outbreak_sim::{Context, DataPlugin, Parameters};
#[derive(Default)]
struct PeakTracker {
    peak: i64,
}

impl DataPlugin for PeakTracker {
    const new: &'static dyn Fn() -> Self = &PeakTracker::default;
}

let mut context = Context::new(Parameters::default());
context.get_data_container_mut::<PeakTracker>().peak = 12;
assert_eq!(context.get_data_container::<PeakTracker>().unwrap().peak, 12);
```

*/

use std::any::{Any, TypeId};

use rustc_hash::FxHashMap;

use crate::parameters::Parameters;

/// A type the `Context` can construct on demand and store by type.
pub trait DataPlugin: Any {
    /// A constant reference to a constructor for the empty plugin.
    #[allow(non_upper_case_globals)]
    const new: &'static dyn Fn() -> Self;
}

pub struct Context {
    parameters: Parameters,
    // This is actually a `HashMap<TypeId, Box<T: DataPlugin>>`.
    data_plugins: FxHashMap<TypeId, Box<dyn Any>>,
}

impl Context {
    /// Creates a context for a run with the given parameters. The parameters are fixed for the
    /// lifetime of the context.
    #[must_use]
    pub fn new(parameters: Parameters) -> Self {
        Context {
            parameters,
            data_plugins: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns a mutable reference to the data container for `T`, creating it if it doesn't
    /// exist yet.
    pub fn get_data_container_mut<T: DataPlugin>(&mut self) -> &mut T {
        self.data_plugins
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new((T::new)()))
            .downcast_mut::<T>()
            .unwrap() // Will never panic as data container has the matching type
    }

    /// Returns a reference to the data container for `T` if it exists.
    /// If you need a mutable reference or lazy instantiation, use
    /// `Context::get_data_container_mut()`.
    #[must_use]
    pub fn get_data_container<T: DataPlugin>(&self) -> Option<&T> {
        self.data_plugins
            .get(&TypeId::of::<T>())
            .and_then(|data| data.downcast_ref::<T>())
    }

    /// Removes the data container for `T` and returns it, leaving nothing behind.
    pub fn take_data_container<T: DataPlugin>(&mut self) -> Option<T> {
        self.data_plugins
            .remove(&TypeId::of::<T>())
            .and_then(|data| data.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }
}
