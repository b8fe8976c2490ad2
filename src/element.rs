//! Element handles.
//!
//! The binding never creates or destroys elements. It holds shared handles
//! supplied by the caller and only asks them for geometry when both the
//! reference and the floating element are present.
//!
//! Handles compare by identity: two `ElementRef`s are equal when they point
//! at the same element, which is what signal change detection needs.

use std::fmt;
use std::rc::Rc;

use crate::types::Rect;

// =============================================================================
// Capabilities
// =============================================================================

/// A laid-out element that can report its geometry.
pub trait Element {
    /// Border box in viewport coordinates.
    fn bounding_client_rect(&self) -> Rect;

    /// Physical pixels per CSS pixel for the element's window.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
}

/// A synthetic reference (a cursor position, a text range, ...).
pub trait VirtualElement {
    fn bounding_client_rect(&self) -> Rect;

    /// Real element used to find clipping ancestors, if any.
    fn context_element(&self) -> Option<ElementRef> {
        None
    }
}

// =============================================================================
// Handles
// =============================================================================

/// Shared handle to an [`Element`].
#[derive(Clone)]
pub struct ElementRef(Rc<dyn Element>);

impl ElementRef {
    pub fn new(element: impl Element + 'static) -> Self {
        Self(Rc::new(element))
    }

    pub fn from_rc(element: Rc<dyn Element>) -> Self {
        Self(element)
    }

    pub fn bounding_client_rect(&self) -> Rect {
        self.0.bounding_client_rect()
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.0.device_pixel_ratio()
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementRef({:p})", Rc::as_ptr(&self.0))
    }
}

/// Shared handle to a [`VirtualElement`].
#[derive(Clone)]
pub struct VirtualRef(Rc<dyn VirtualElement>);

impl VirtualRef {
    pub fn new(element: impl VirtualElement + 'static) -> Self {
        Self(Rc::new(element))
    }

    pub fn bounding_client_rect(&self) -> Rect {
        self.0.bounding_client_rect()
    }

    pub fn context_element(&self) -> Option<ElementRef> {
        self.0.context_element()
    }
}

impl PartialEq for VirtualRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for VirtualRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VirtualRef({:p})", Rc::as_ptr(&self.0))
    }
}

/// The anchor the floating element is positioned against.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceElement {
    Element(ElementRef),
    Virtual(VirtualRef),
}

impl ReferenceElement {
    pub fn bounding_client_rect(&self) -> Rect {
        match self {
            Self::Element(el) => el.bounding_client_rect(),
            Self::Virtual(v) => v.bounding_client_rect(),
        }
    }

    /// The real element behind this reference, if there is one.
    pub fn context_element(&self) -> Option<ElementRef> {
        match self {
            Self::Element(el) => Some(el.clone()),
            Self::Virtual(v) => v.context_element(),
        }
    }
}

impl From<ElementRef> for ReferenceElement {
    fn from(element: ElementRef) -> Self {
        Self::Element(element)
    }
}

impl From<VirtualRef> for ReferenceElement {
    fn from(element: VirtualRef) -> Self {
        Self::Virtual(element)
    }
}

// =============================================================================
// Tests
// =============================================================================
