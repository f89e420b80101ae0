//! Stack growth guard for recursive descent.
//!
//! Grammar rules recurse once per nesting level of the source
//! (`((((x))))`, `{ { { } } }`, `-!-!x`), so a hostile or generated
//! document can exhaust the native stack long before it exhausts memory.
//! Rules that can recurse wrap their body in [`ensure_sufficient_stack`].
//!
//! On wasm the guard is a passthrough.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn expression(&mut self) -> Option<Rc<Expr>> {
///     ensure_sufficient_stack(|| self.logical())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
