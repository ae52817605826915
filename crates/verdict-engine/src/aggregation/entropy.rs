//! Shannon entropy over weighted category distributions.

/// `H = −Σ pᵢ·log2(pᵢ)` in bits, with the 0·log2(0) ≡ 0 convention.
///
/// For k observed categories the result lies in [0, log2(k)]: 0 for a
/// unanimous distribution, log2(k) for a uniform one.
pub fn shannon_entropy_bits<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}
