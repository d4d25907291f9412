//! Stack growth for recursive tree walks.
//!
//! Message bodies, aggregate option values and prefixed types nest without
//! any grammar limit, and both the parser and the tree dump recurse on that
//! nesting. Every recursive step goes through [`ensure_sufficient_stack`],
//! which moves onto a fresh stack segment when the current one runs low.
//!
//! On `wasm32` the guard is a plain call.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one has
/// less than the red zone left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes of stack left on the current segment, if the platform reports it.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests;
