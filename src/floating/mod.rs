//! Positioning binding.
//!
//! [`create_floating`] keeps a floating element positioned against its
//! reference element. It owns the element state, watches every option, and
//! asks a [`PositionEngine`] for a new position whenever something changes.
//! The answer is published as a single [`PositionData`] signal write, so all
//! readers see one result or the next, never a mix.
//!
//! # Lifecycle
//!
//! ```text
//! Unmounted -> Idle (open = false) -> Watching -> Positioned
//!                   ^                    ^            |
//!                   |                    +------------+ (recompute)
//!                   +---------------------------------+ (open = false)
//! any state -> TornDown (dispose)
//! ```
//!
//! Leaving `Watching` always runs the pending watcher cleanup.
//!
//! # Example
//!
//! ```ignore
//! use futures::executor::LocalPool;
//! use spark_floating::{create_floating, FloatingOptions, Placement};
//! use spark_signals::signal;
//!
//! let mut pool = LocalPool::new();
//! let open = signal(false);
//!
//! let floating = create_floating(engine, pool.spawner(), FloatingOptions {
//!     placement: Some(Placement::Top.into()),
//!     open: Some(open.clone().into()),
//!     ..Default::default()
//! });
//!
//! let refs = floating.refs();
//! refs.set_reference(Some(button.into()));
//! refs.set_floating(Some(tooltip));
//!
//! open.set(true);
//! pool.run_until_stalled();
//!
//! let styles = floating.floating_styles();
//! ```

mod cleanup;
mod styles;

use std::cell::Cell;
use std::rc::{Rc, Weak};

use futures::task::{LocalSpawn, LocalSpawnExt};
use spark_signals::{effect, effect_scope, on_scope_dispose, signal, Signal};

use crate::element::{ElementRef, ReferenceElement};
use crate::engine::{ComputePositionConfig, ComputePositionReturn, Middleware, PositionEngine};
use crate::error::{ComputeError, FloatingError};
use crate::props::{accessor_or, Accessor, PropValue};
use crate::types::{ArrowData, MiddlewareData, Placement, PositionData, Strategy};

use cleanup::CleanupSlot;

pub use cleanup::{mount_watcher, Cleanup, UpdateFn, WhileElementsMounted};
pub use styles::{compute_floating_styles, FloatingStyles};

// =============================================================================
// Options
// =============================================================================

/// Elements managed outside the binding.
///
/// When an accessor yields `Some`, it wins over the element assigned through
/// [`FloatingRefs`].
#[derive(Default)]
pub struct ExternalElements {
    pub reference: Option<PropValue<Option<ReferenceElement>>>,
    pub floating: Option<PropValue<Option<ElementRef>>>,
}

/// Options for [`create_floating`]. Every field is optional.
///
/// ```ignore
/// let placement = signal(Placement::TopEnd);
///
/// FloatingOptions {
///     placement: Some(placement.clone().into()),
///     strategy: Some(Strategy::Fixed.into()),
///     transform: Some(false.into()),
///     ..Default::default()
/// }
/// ```
#[derive(Default)]
pub struct FloatingOptions {
    /// Where to place the floating element (default: bottom).
    pub placement: Option<PropValue<Placement>>,
    /// CSS positioning mode (default: absolute).
    pub strategy: Option<PropValue<Strategy>>,
    /// Position with `transform` instead of `top`/`left` (default: true).
    pub transform: Option<PropValue<bool>>,
    /// Middleware forwarded to the engine (default: none). `None` entries
    /// are switched off and skipped.
    pub middleware: Option<PropValue<Vec<Option<Middleware>>>>,
    /// Whether the floating element is open (default: true).
    pub open: Option<PropValue<bool>>,
    /// Arrow element. Only read so that changing it recomputes.
    pub arrow: Option<PropValue<Option<ElementRef>>>,
    /// Watcher kept installed while both elements are mounted and open.
    /// Without one, each change triggers a single update.
    pub while_elements_mounted: Option<WhileElementsMounted>,
    pub elements: ExternalElements,
}

struct Config {
    placement: Accessor<Placement>,
    strategy: Accessor<Strategy>,
    transform: Accessor<bool>,
    middleware: Accessor<Vec<Option<Middleware>>>,
    open: Accessor<bool>,
    arrow: Accessor<Option<ElementRef>>,
    external_reference: Option<Accessor<Option<ReferenceElement>>>,
    external_floating: Option<Accessor<Option<ElementRef>>>,
}

impl Config {
    fn new(options: &mut FloatingOptions) -> Self {
        Self {
            placement: accessor_or(options.placement.take(), Placement::default()),
            strategy: accessor_or(options.strategy.take(), Strategy::default()),
            transform: accessor_or(options.transform.take(), true),
            middleware: accessor_or(options.middleware.take(), Vec::new()),
            open: accessor_or(options.open.take(), true),
            arrow: accessor_or(options.arrow.take(), None),
            external_reference: options.elements.reference.take().map(PropValue::into_accessor),
            external_floating: options.elements.floating.take().map(PropValue::into_accessor),
        }
    }
}

// =============================================================================
// State
// =============================================================================

/// Where a binding is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatingState {
    /// Reference or floating element missing.
    Unmounted,
    /// Both elements present, closed.
    Idle,
    /// Open, waiting for the first successful computation.
    Watching,
    /// Open and the last computation succeeded.
    Positioned,
    /// Disposed.
    TornDown,
}

struct FloatingInner {
    engine: Rc<dyn PositionEngine>,
    spawner: Rc<dyn LocalSpawn>,
    config: Config,
    while_elements_mounted: Option<WhileElementsMounted>,

    reference: Signal<Option<ReferenceElement>>,
    floating: Signal<Option<ElementRef>>,
    data: Signal<PositionData>,
    styles_override: Signal<Option<FloatingStyles>>,

    cleanup: CleanupSlot,
    /// Latest request id. Responses carrying an older id are dropped.
    generation: Cell<u64>,
    disposed: Cell<bool>,
}

impl FloatingInner {
    fn resolved_reference(&self) -> Option<ReferenceElement> {
        let external = self.config.external_reference.as_ref().and_then(|read| read());
        let internal = self.reference.get();
        external.or(internal)
    }

    fn resolved_floating(&self) -> Option<ElementRef> {
        let external = self.config.external_floating.as_ref().and_then(|read| read());
        let internal = self.floating.get();
        external.or(internal)
    }

    /// Supersede any request in flight.
    fn invalidate(&self) {
        self.generation.set(self.generation.get() + 1);
    }

    fn update(self: &Rc<Self>) {
        if self.disposed.get() {
            return;
        }
        let (Some(reference), Some(floating)) = (self.resolved_reference(), self.resolved_floating())
        else {
            return;
        };

        let config = ComputePositionConfig {
            placement: (self.config.placement)(),
            strategy: (self.config.strategy)(),
            middleware: (self.config.middleware)().into_iter().flatten().collect(),
        };

        self.invalidate();
        let generation = self.generation.get();
        tracing::trace!(
            generation,
            placement = %config.placement,
            strategy = %config.strategy,
            middleware = config.middleware.len(),
            "requesting floating position"
        );

        let request = self.engine.compute_position(reference, floating, config);
        let weak = Rc::downgrade(self);
        let task = async move {
            let result = request.await;
            if let Some(inner) = weak.upgrade() {
                inner.publish(generation, result);
            }
        };

        if let Err(err) = self.spawner.spawn_local(task) {
            tracing::error!(error = %FloatingError::from(err), "floating position request not started");
        }
    }

    fn publish(&self, generation: u64, result: Result<ComputePositionReturn, ComputeError>) {
        let latest = self.generation.get();
        if self.disposed.get() || generation != latest {
            tracing::debug!(generation, latest, "dropping superseded floating position");
            return;
        }

        match result {
            Ok(computed) => {
                let arrow = computed.middleware_data.arrow();
                self.data.set(PositionData {
                    x: computed.x,
                    y: computed.y,
                    placement: computed.placement,
                    strategy: computed.strategy,
                    middleware_data: computed.middleware_data,
                    arrow,
                    is_positioned: true,
                });
                if self.styles_override.get().is_some() {
                    self.styles_override.set(None);
                }
            }
            Err(err) => {
                tracing::error!(error = %FloatingError::from(err), "failed to compute floating position");
            }
        }
    }

    /// Recompute effect: subscribes to every input, then installs the
    /// watcher or runs a single update.
    fn run_recompute(self: &Rc<Self>) {
        let reference = self.resolved_reference();
        let floating = self.resolved_floating();
        let open = (self.config.open)();
        // Read for subscription only
        let _ = (self.config.placement)();
        let _ = (self.config.strategy)();
        let _ = (self.config.transform)();
        let _ = (self.config.middleware)();
        let _ = (self.config.arrow)();

        if self.cleanup.flush() {
            tracing::trace!("mount watcher removed");
        }

        let (true, Some(reference), Some(floating)) = (open, reference, floating) else {
            self.invalidate();
            return;
        };

        match &self.while_elements_mounted {
            Some(watch) => {
                let cleanup = watch(reference, floating, update_fn(Rc::downgrade(self)));
                self.cleanup.replace(cleanup);
                tracing::trace!("mount watcher installed");
            }
            None => self.update(),
        }
    }

    /// Depositioning effect: closing clears `is_positioned`, nothing else.
    fn run_open_watch(&self) {
        let open = (self.config.open)();
        let data = self.data.get();
        if !open && data.is_positioned {
            self.data.set(PositionData {
                is_positioned: false,
                ..data
            });
        }
    }

    fn teardown(&self) {
        self.disposed.set(true);
        self.invalidate();
        if self.cleanup.flush() {
            tracing::trace!("mount watcher removed on dispose");
        }
        tracing::debug!("floating binding disposed");
    }
}

fn update_fn(inner: Weak<FloatingInner>) -> UpdateFn {
    Rc::new(move || {
        if let Some(inner) = inner.upgrade() {
            inner.update();
        }
    })
}

// =============================================================================
// Binding
// =============================================================================

/// Create a positioning binding.
///
/// Effects are created inside a dedicated effect scope. The scope stops when
/// the returned [`Floating`] is disposed or dropped, or when an enclosing
/// scope stops; either way the pending watcher cleanup runs exactly once.
pub fn create_floating(
    engine: impl PositionEngine + 'static,
    spawner: impl LocalSpawn + 'static,
    mut options: FloatingOptions,
) -> Floating {
    let config = Config::new(&mut options);
    let initial = PositionData::initial((config.placement)(), (config.strategy)());

    let inner = Rc::new(FloatingInner {
        engine: Rc::new(engine),
        spawner: Rc::new(spawner),
        config,
        while_elements_mounted: options.while_elements_mounted.take(),
        reference: signal(None),
        floating: signal(None),
        data: signal(initial),
        styles_override: signal(None),
        cleanup: CleanupSlot::default(),
        generation: Cell::new(0),
        disposed: Cell::new(false),
    });

    let scope = effect_scope(false);

    let recompute = inner.clone();
    let open_watch = inner.clone();
    let dispose = inner.clone();
    scope.run(move || {
        let _recompute = effect(move || recompute.run_recompute());
        let _open_watch = effect(move || open_watch.run_open_watch());

        on_scope_dispose(move || dispose.teardown());
    });

    Floating {
        inner,
        stop_scope: Some(Box::new(move || {
            scope.stop();
        })),
    }
}

/// Handle returned by [`create_floating`].
///
/// All getters are tracked reads: calling them inside an effect subscribes it.
pub struct Floating {
    inner: Rc<FloatingInner>,
    stop_scope: Option<Box<dyn FnOnce()>>,
}

impl Floating {
    pub fn x(&self) -> f64 {
        self.inner.data.get().x
    }

    pub fn y(&self) -> f64 {
        self.inner.data.get().y
    }

    /// Resolved placement of the last computation.
    pub fn placement(&self) -> Placement {
        self.inner.data.get().placement
    }

    /// Resolved strategy of the last computation.
    pub fn strategy(&self) -> Strategy {
        self.inner.data.get().strategy
    }

    pub fn is_positioned(&self) -> bool {
        self.inner.data.get().is_positioned
    }

    pub fn middleware_data(&self) -> MiddlewareData {
        self.inner.data.get().middleware_data
    }

    pub fn arrow(&self) -> Option<ArrowData> {
        self.inner.data.get().arrow
    }

    /// The whole position result.
    pub fn data(&self) -> PositionData {
        self.inner.data.get()
    }

    /// Styles for the floating element, or the manual override if one is set.
    pub fn floating_styles(&self) -> FloatingStyles {
        let data = self.inner.data.get();
        let transform = (self.inner.config.transform)();
        let floating = self.inner.resolved_floating();
        let overridden = self.inner.styles_override.get();

        overridden.unwrap_or_else(|| compute_floating_styles(&data, transform, floating.as_ref()))
    }

    /// Override the styles until the next successful computation.
    pub fn set_floating_styles(&self, styles: FloatingStyles) {
        self.inner.styles_override.set(Some(styles));
    }

    /// Recompute now. No-op unless both elements are present.
    pub fn update(&self) {
        self.inner.update();
    }

    /// Update function that can outlive borrows of this handle.
    pub fn update_fn(&self) -> UpdateFn {
        update_fn(Rc::downgrade(&self.inner))
    }

    /// Resolved elements (external accessors first).
    ///
    /// Unlike [`refs`](Self::refs), which reports only what was assigned
    /// through the setters, these getters return the element the binding
    /// actually positions against.
    pub fn elements(&self) -> FloatingElements {
        FloatingElements {
            inner: self.inner.clone(),
        }
    }

    /// Element setters and getters.
    pub fn refs(&self) -> FloatingRefs {
        FloatingRefs {
            reference: self.inner.reference.clone(),
            floating: self.inner.floating.clone(),
        }
    }

    pub fn lifecycle(&self) -> FloatingState {
        if self.inner.disposed.get() {
            return FloatingState::TornDown;
        }
        let mounted =
            self.inner.resolved_reference().is_some() && self.inner.resolved_floating().is_some();
        if !mounted {
            FloatingState::Unmounted
        } else if !(self.inner.config.open)() {
            FloatingState::Idle
        } else if self.inner.data.get().is_positioned {
            FloatingState::Positioned
        } else {
            FloatingState::Watching
        }
    }

    /// Stop all effects and run the pending watcher cleanup.
    pub fn dispose(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(stop) = self.stop_scope.take() {
            stop();
        }
        // Scope may already be gone with an enclosing scope
        if !self.inner.disposed.get() {
            self.inner.teardown();
        }
    }
}

impl Drop for Floating {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// Element accessors
// =============================================================================

/// Element setters for the binding, plus getters of what was set.
#[derive(Clone)]
pub struct FloatingRefs {
    reference: Signal<Option<ReferenceElement>>,
    floating: Signal<Option<ElementRef>>,
}

impl FloatingRefs {
    pub fn set_reference(&self, reference: Option<ReferenceElement>) {
        self.reference.set(reference);
    }

    pub fn set_floating(&self, floating: Option<ElementRef>) {
        self.floating.set(floating);
    }

    pub fn reference(&self) -> Option<ReferenceElement> {
        self.reference.get()
    }

    pub fn floating(&self) -> Option<ElementRef> {
        self.floating.get()
    }
}

/// Resolved element getters.
#[derive(Clone)]
pub struct FloatingElements {
    inner: Rc<FloatingInner>,
}

impl FloatingElements {
    pub fn reference(&self) -> Option<ReferenceElement> {
        self.inner.resolved_reference()
    }

    pub fn floating(&self) -> Option<ElementRef> {
        self.inner.resolved_floating()
    }
}

// =============================================================================
// Tests
// =============================================================================
