//! Prop values - static, signal or getter.
//!
//! Every option of [`create_floating`](crate::create_floating) accepts a
//! [`PropValue`]. At construction the binding turns each one into an
//! [`Accessor`], a plain zero-argument read function, so the rest of the code
//! has a single path regardless of how the caller supplied the value.
//!
//! Reading an accessor inside an effect subscribes the effect when the prop is
//! backed by a signal (directly or through a getter that reads one).

use std::rc::Rc;

use spark_signals::Signal;

/// Zero-argument read function.
pub type Accessor<T> = Rc<dyn Fn() -> T>;

/// A property value that can be static, a signal, or a getter.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Wrap a getter closure.
    pub fn getter(f: impl Fn() -> T + 'static) -> Self {
        PropValue::Getter(Rc::new(f))
    }

    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    /// Normalize into a read function.
    pub fn into_accessor(self) -> Accessor<T> {
        match self {
            PropValue::Static(v) => Rc::new(move || v.clone()),
            PropValue::Signal(s) => Rc::new(move || s.get()),
            PropValue::Getter(f) => f,
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

/// Accessor for an optional prop, falling back to `default` when absent.
pub fn accessor_or<T: Clone + PartialEq + 'static>(prop: Option<PropValue<T>>, default: T) -> Accessor<T> {
    match prop {
        Some(prop) => prop.into_accessor(),
        None => PropValue::Static(default).into_accessor(),
    }
}

// =============================================================================
// Tests
// =============================================================================
