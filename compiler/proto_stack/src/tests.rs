use super::*;

/// A nested-list shape like `[[[...]]]`, walked recursively.
enum Nest {
    Leaf,
    List(Box<Nest>),
}

fn build(depth: usize) -> Nest {
    let mut n = Nest::Leaf;
    for _ in 0..depth {
        n = Nest::List(Box::new(n));
    }
    n
}

fn depth_of(n: &Nest) -> usize {
    ensure_sufficient_stack(|| match n {
        Nest::Leaf => 0,
        Nest::List(inner) => depth_of(inner) + 1,
    })
}

fn drop_iteratively(mut n: Nest) {
    while let Nest::List(inner) = n {
        n = *inner;
    }
}

#[test]
fn shallow_walk() {
    let n = build(8);
    assert_eq!(depth_of(&n), 8);
    drop_iteratively(n);
}

#[test]
fn deep_walk_grows_stack() {
    let n = build(200_000);
    assert_eq!(depth_of(&n), 200_000);
    drop_iteratively(n);
}

#[test]
fn passes_through_result() {
    let r: Result<u32, String> = ensure_sufficient_stack(|| Ok(7));
    assert_eq!(r, Ok(7));
}

#[test]
#[cfg(not(target_arch = "wasm32"))]
fn reports_remaining_stack() {
    // Not every platform can report it; when it does, it is nonzero.
    if let Some(left) = remaining_stack() {
        assert!(left > 0);
    }
}
