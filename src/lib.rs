//! # spark-floating
//!
//! Reactive floating element positioning for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A binding created with [`create_floating`] owns the reference and floating
//! element state and reads every option through an accessor. Two effects run
//! inside the binding's effect scope:
//!
//! ```text
//! elements + options ──> recompute effect ──> watcher / update ──> PositionEngine
//!                                                                      │ (async)
//! open flag ──────────> depositioning effect          PositionData <───┘
//!                                                          │
//!                                              floating_styles(), x(), y(), ...
//! ```
//!
//! The placement algorithm itself is external: implement [`PositionEngine`]
//! (or wrap an existing one) and hand it to the binding together with a local
//! executor spawner.
//!
//! ## Modules
//!
//! - [`types`] - Placement, strategy, rects, middleware data, position result
//! - [`element`] - Element capabilities and identity-compared handles
//! - [`engine`] - Position engine and middleware interface
//! - [`props`] - Static / signal / getter option values
//! - [`floating`] - The positioning binding and its CSS projection
//! - [`utils`] - Device-pixel-ratio rounding

pub mod element;
pub mod engine;
pub mod error;
pub mod floating;
pub mod props;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use types::*;

pub use element::{Element, ElementRef, ReferenceElement, VirtualElement, VirtualRef};

pub use engine::{
    ComputePositionConfig, ComputePositionReturn, Middleware, MiddlewareReturn, MiddlewareState,
    PositionEngine,
};

pub use error::{ComputeError, FloatingError};

pub use floating::{
    compute_floating_styles, create_floating, mount_watcher, Cleanup, ExternalElements, Floating,
    FloatingElements, FloatingOptions, FloatingRefs, FloatingState, FloatingStyles, UpdateFn,
    WhileElementsMounted,
};

pub use props::{Accessor, PropValue};

pub use utils::{get_dpr, round_by_dpr};
