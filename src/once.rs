
use crate::{ChangeListener, Source};


type OnExecute<T> = Box<dyn FnOnce(&Source<T>, &T, &T)>;
type RunCondition<T> = Box<dyn Fn(&Source<T>, &T, &T) -> bool>;


// listener that runs its callback on the first change satisfying the
// run condition, detaching itself from the source beforehand
pub struct OnceListener<T> {
    on_execute: Option<OnExecute<T>>,
    run_condition: RunCondition<T>,
}

impl<T> OnceListener<T> {

    // runs on the first change, whatever the value
    pub fn new(on_execute: impl FnOnce(&Source<T>, &T, &T) + 'static) -> Self {
        Self::when(|_, _, _| true, on_execute)
    }

    pub fn when(
        run_condition: impl Fn(&Source<T>, &T, &T) -> bool + 'static,
        on_execute: impl FnOnce(&Source<T>, &T, &T) + 'static,
    ) -> Self {
        Self {
            on_execute: Some(Box::new(on_execute)),
            run_condition: Box::new(run_condition),
        }
    }

    pub fn when_equal(value: T, on_execute: impl FnOnce(&Source<T>, &T, &T) + 'static) -> Self
        where T: PartialEq + 'static
    {
        Self::when(move |_, _, new_value| *new_value == value, on_execute)
    }

    pub fn when_not_equal(value: T, on_execute: impl FnOnce(&Source<T>, &T, &T) + 'static) -> Self
        where T: PartialEq + 'static
    {
        Self::when(move |_, _, new_value| *new_value != value, on_execute)
    }

    // whether the callback has already run
    pub fn fired(&self) -> bool {
        self.on_execute.is_none()
    }
}

impl<V> OnceListener<Option<V>> {

    pub fn when_some(
        on_execute: impl FnOnce(&Source<Option<V>>, &Option<V>, &Option<V>) + 'static,
    ) -> Self {
        Self::when(|_, _, new_value| new_value.is_some(), on_execute)
    }

    pub fn when_none(
        on_execute: impl FnOnce(&Source<Option<V>>, &Option<V>, &Option<V>) + 'static,
    ) -> Self {
        Self::when(|_, _, new_value| new_value.is_none(), on_execute)
    }
}

impl OnceListener<bool> {

    pub fn when_true(on_execute: impl FnOnce(&Source<bool>, &bool, &bool) + 'static) -> Self {
        Self::when_equal(true, on_execute)
    }

    pub fn when_false(on_execute: impl FnOnce(&Source<bool>, &bool, &bool) + 'static) -> Self {
        Self::when_equal(false, on_execute)
    }
}

impl<T> ChangeListener<T> for OnceListener<T> {

    fn changed(&mut self, source: &Source<T>, old_value: &T, new_value: &T) {

        if self.fired() || !(self.run_condition)(source, old_value, new_value) {
            return
        }

        // detach first, so changes made by the callback cannot re-trigger it
        source.detach();

        if let Some(on_execute) = self.on_execute.take() {
            log::trace!("one-time listener {:?} fired", source.id());
            on_execute(source, old_value, new_value);
        }
    }
}
