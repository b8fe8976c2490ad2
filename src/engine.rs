//! Position engine interface.
//!
//! The placement algorithm lives outside this crate. A [`PositionEngine`]
//! takes the two elements and a [`ComputePositionConfig`] and resolves,
//! asynchronously, to a [`ComputePositionReturn`]. Middleware are named
//! functions the engine runs in order; the binding only forwards them.

use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::element::{ElementRef, ReferenceElement};
use crate::error::ComputeError;
use crate::types::{ElementRects, MiddlewareData, MiddlewareOutput, Placement, Strategy};

// =============================================================================
// Engine
// =============================================================================

/// Asynchronous geometry engine.
pub trait PositionEngine {
    fn compute_position(
        &self,
        reference: ReferenceElement,
        floating: ElementRef,
        config: ComputePositionConfig,
    ) -> LocalBoxFuture<'static, Result<ComputePositionReturn, ComputeError>>;
}

impl<E: PositionEngine + ?Sized> PositionEngine for Rc<E> {
    fn compute_position(
        &self,
        reference: ReferenceElement,
        floating: ElementRef,
        config: ComputePositionConfig,
    ) -> LocalBoxFuture<'static, Result<ComputePositionReturn, ComputeError>> {
        (**self).compute_position(reference, floating, config)
    }
}

/// One position request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComputePositionConfig {
    pub placement: Placement,
    pub strategy: Strategy,
    pub middleware: Vec<Middleware>,
}

/// Engine answer for one request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComputePositionReturn {
    pub x: f64,
    pub y: f64,
    /// Final placement; middleware such as `flip` may change it.
    pub placement: Placement,
    pub strategy: Strategy,
    pub middleware_data: MiddlewareData,
}

// =============================================================================
// Middleware
// =============================================================================

/// State handed to each middleware by the engine.
#[derive(Debug, Clone)]
pub struct MiddlewareState {
    pub x: f64,
    pub y: f64,
    pub initial_placement: Placement,
    pub placement: Placement,
    pub strategy: Strategy,
    pub middleware_data: MiddlewareData,
    pub rects: ElementRects,
    pub reference: ReferenceElement,
    pub floating: ElementRef,
}

/// What a middleware asks the engine to change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MiddlewareReturn {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub data: Option<MiddlewareOutput>,
}

type MiddlewareFn = dyn Fn(&MiddlewareState) -> MiddlewareReturn;

/// A named geometry transform.
///
/// Compares by identity, so building a fresh list always counts as a change,
/// even when the new list would compute the same position.
#[derive(Clone)]
pub struct Middleware {
    name: Rc<str>,
    run: Rc<MiddlewareFn>,
}

impl Middleware {
    pub fn new(
        name: impl Into<Rc<str>>,
        run: impl Fn(&MiddlewareState) -> MiddlewareReturn + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            run: Rc::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run against the given state. Called by engines, never by the binding.
    pub fn apply(&self, state: &MiddlewareState) -> MiddlewareReturn {
        (self.run)(state)
    }
}

impl PartialEq for Middleware {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.run, &other.run)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").field("name", &self.name).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
