//! Test support: fake elements and small position engines.
//!
//! `BasicEngine` only knows the base placement coordinates and runs the
//! middleware it is given. It exists to drive the binding, not to model a
//! real engine.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

use spark_floating::{
    Alignment, ComputeError, ComputePositionConfig, ComputePositionReturn, Element, ElementRef,
    ElementRects, Middleware, MiddlewareData, MiddlewareOutput, MiddlewareReturn, MiddlewareState,
    Placement, PositionEngine, Rect, ReferenceElement, Side,
};

// =============================================================================
// Fake element
// =============================================================================

/// Element with mutable geometry and an inline style map.
pub struct TestElement {
    pub rect: Cell<Rect>,
    pub dpr: Cell<f64>,
    pub style: RefCell<BTreeMap<String, String>>,
}

impl TestElement {
    pub fn new(rect: Rect) -> Rc<Self> {
        Rc::new(Self {
            rect: Cell::new(rect),
            dpr: Cell::new(1.0),
            style: RefCell::new(BTreeMap::new()),
        })
    }

    /// Zero-sized element at the origin, like an unstyled node in a test DOM.
    pub fn empty() -> Rc<Self> {
        Self::new(Rect::default())
    }
}

impl Element for TestElement {
    fn bounding_client_rect(&self) -> Rect {
        self.rect.get()
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr.get()
    }
}

pub fn handle(element: &Rc<TestElement>) -> ElementRef {
    let element: Rc<dyn Element> = element.clone();
    ElementRef::from_rc(element)
}

pub fn reference(element: &Rc<TestElement>) -> Option<ReferenceElement> {
    Some(ReferenceElement::Element(handle(element)))
}

/// The 50x50 box at the origin used by most position assertions.
pub fn square_reference() -> Rc<TestElement> {
    TestElement::new(Rect::new(0.0, 0.0, 50.0, 50.0))
}

// =============================================================================
// Engines
// =============================================================================

fn base_coords(placement: Placement, rects: &ElementRects) -> (f64, f64) {
    let reference = rects.reference;
    let floating = rects.floating;
    let common_x = reference.x + reference.width / 2.0 - floating.width / 2.0;
    let common_y = reference.y + reference.height / 2.0 - floating.height / 2.0;

    let (mut x, mut y) = match placement.side() {
        Side::Top => (common_x, reference.y - floating.height),
        Side::Bottom => (common_x, reference.bottom()),
        Side::Right => (reference.right(), common_y),
        Side::Left => (reference.x - floating.width, common_y),
    };

    let vertical = matches!(placement.side(), Side::Top | Side::Bottom);
    let common_align = if vertical {
        reference.width / 2.0 - floating.width / 2.0
    } else {
        reference.height / 2.0 - floating.height / 2.0
    };
    let shift = match placement.alignment() {
        Some(Alignment::Start) => -common_align,
        Some(Alignment::End) => common_align,
        None => 0.0,
    };
    if vertical {
        x += shift;
    } else {
        y += shift;
    }
    (x, y)
}

/// Run the request synchronously.
pub fn run_request(
    reference: ReferenceElement,
    floating: ElementRef,
    config: ComputePositionConfig,
) -> ComputePositionReturn {
    let rects = ElementRects {
        reference: reference.bounding_client_rect(),
        floating: floating.bounding_client_rect(),
    };
    let (mut x, mut y) = base_coords(config.placement, &rects);
    let mut middleware_data = MiddlewareData::new();

    for middleware in &config.middleware {
        let state = MiddlewareState {
            x,
            y,
            initial_placement: config.placement,
            placement: config.placement,
            strategy: config.strategy,
            middleware_data: middleware_data.clone(),
            rects,
            reference: reference.clone(),
            floating: floating.clone(),
        };
        let result = middleware.apply(&state);
        x = result.x.unwrap_or(x);
        y = result.y.unwrap_or(y);
        if let Some(data) = result.data {
            middleware_data.insert(middleware.name(), data);
        }
    }

    ComputePositionReturn {
        x,
        y,
        placement: config.placement,
        strategy: config.strategy,
        middleware_data,
    }
}

/// Resolves on first poll. Counts requests.
#[derive(Clone, Default)]
pub struct BasicEngine {
    pub requests: Rc<Cell<u32>>,
    pub fail: Rc<Cell<bool>>,
}

impl PositionEngine for BasicEngine {
    fn compute_position(
        &self,
        reference: ReferenceElement,
        floating: ElementRef,
        config: ComputePositionConfig,
    ) -> LocalBoxFuture<'static, Result<ComputePositionReturn, ComputeError>> {
        self.requests.set(self.requests.get() + 1);
        let result = if self.fail.get() {
            Err(ComputeError::Detached)
        } else {
            Ok(run_request(reference, floating, config))
        };
        future::ready(result).boxed_local()
    }
}

/// Holds every answer until the test releases it, in any order.
#[derive(Clone, Default)]
pub struct DeferredEngine {
    pending: Rc<RefCell<Vec<(ComputePositionReturn, oneshot::Sender<ComputePositionReturn>)>>>,
}

impl DeferredEngine {
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Release the request at `index` (in issue order among those pending).
    pub fn resolve(&self, index: usize) {
        let (answer, sender) = self.pending.borrow_mut().remove(index);
        let _ = sender.send(answer);
    }
}

impl PositionEngine for DeferredEngine {
    fn compute_position(
        &self,
        reference: ReferenceElement,
        floating: ElementRef,
        config: ComputePositionConfig,
    ) -> LocalBoxFuture<'static, Result<ComputePositionReturn, ComputeError>> {
        let answer = run_request(reference, floating, config);
        let (sender, receiver) = oneshot::channel();
        self.pending.borrow_mut().push((answer, sender));
        receiver
            .map(|answer| answer.map_err(|_| ComputeError::Failed("request dropped".into())))
            .boxed_local()
    }
}

// =============================================================================
// Middleware
// =============================================================================

/// Push the floating element away from the reference along the placement side.
pub fn offset(distance: f64) -> Middleware {
    Middleware::new("offset", move |state: &MiddlewareState| {
        let (x, y) = match state.placement.side() {
            Side::Top => (state.x, state.y - distance),
            Side::Bottom => (state.x, state.y + distance),
            Side::Right => (state.x + distance, state.y),
            Side::Left => (state.x - distance, state.y),
        };
        MiddlewareReturn {
            x: Some(x),
            y: Some(y),
            data: Some(MiddlewareOutput::new().with("x", x - state.x).with("y", y - state.y)),
        }
    })
}

/// Reports arrow offsets centered on the reference.
pub fn arrow() -> Middleware {
    Middleware::new("arrow", |state: &MiddlewareState| {
        let center = state.rects.reference.x + state.rects.reference.width / 2.0 - state.x;
        MiddlewareReturn {
            x: None,
            y: None,
            data: Some(
                MiddlewareOutput::new()
                    .with("x", center)
                    .with("center_offset", 0.0),
            ),
        }
    })
}

/// Writes `max-height` on the floating element, like a size middleware's apply.
pub fn size(target: Rc<TestElement>) -> Middleware {
    Middleware::new("size", move |state: &MiddlewareState| {
        let available = (state.rects.reference.y - state.y).abs();
        target
            .style
            .borrow_mut()
            .insert("max-height".into(), format!("{}px", available));
        MiddlewareReturn::default()
    })
}

/// Middleware that changes nothing.
pub fn noop(name: &'static str) -> Middleware {
    Middleware::new(name, |_: &MiddlewareState| MiddlewareReturn::default())
}
