use num_traits::{PrimInt, Unsigned};

/// Calculates the GCD for (u, v) ∈ (N, N), with `gcd(0, v) = v`.
///
/// The [Euclidean GCD] algorithm is used as the underlying implementation.
///
/// [Euclidean GCD]: https://en.wikipedia.org/wiki/Euclidean_algorithm
pub fn gcd<N: Unsigned + PrimInt>(mut u: N, mut v: N) -> N {
    let mut t;
    while !v.is_zero() {
        t = v;
        v = u % v;
        u = t;
    }
    u
}
