use crate::geometry::Layout;
use fastrand::Rng;

/// Picks two distinct entries of `swappable`.
pub fn pick_pair(rng: &mut Rng, swappable: &[usize]) -> Option<(usize, usize)> {
    let n = swappable.len();
    if n < 2 {
        return None;
    }
    let a = rng.usize(0..n);
    let mut b = rng.usize(0..n - 1);
    if b >= a {
        b += 1;
    }
    Some((swappable[a], swappable[b]))
}

/// Applies `1..=max_swaps` random swaps between swappable keys.
/// Returns the number of swaps performed.
pub fn mutate(layout: &mut Layout, swappable: &[usize], rng: &mut Rng, max_swaps: usize) -> usize {
    let swaps = rng.usize(1..=max_swaps.max(1));
    let mut done = 0;
    for _ in 0..swaps {
        if let Some((a, b)) = pick_pair(rng, swappable) {
            layout.swap_bindings(a, b);
            done += 1;
        }
    }
    done
}
