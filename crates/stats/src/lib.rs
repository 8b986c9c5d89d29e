//! Numeric helpers shared by the tfuse crates.
//!
//! Scalar statistics live at the crate root; spatial filters over 2-D
//! planes live in [`filter`].

pub mod filter;

/// Arithmetic mean of a sequence. Returns 0.0 if empty.
pub fn mean<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), &v| (sum + v, n + 1));
    if n == 0 {
        return 0.0;
    }
    sum / n as f64
}

/// Population variance (N denominator).
/// Returns 0.0 if empty.
pub fn population_variance<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
    I::IntoIter: Clone,
{
    let iter = values.into_iter();
    let m = mean(iter.clone());
    let (sq, n) = iter.fold((0.0, 0usize), |(sq, n), &v| {
        let d = v - m;
        (sq + d * d, n + 1)
    });
    if n == 0 {
        return 0.0;
    }
    sq / n as f64
}

/// Population standard deviation (N denominator).
/// Returns 0.0 if empty.
pub fn population_std<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
    I::IntoIter: Clone,
{
    population_variance(values).sqrt()
}

/// Shannon entropy in bits of the strictly positive values.
///
/// Positive values are normalised to a probability mass and
/// `-Σ p·log2(p)` is returned. Non-positive values are ignored; if none
/// remain the entropy is 0.0.
pub fn shannon_entropy<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
    I::IntoIter: Clone,
{
    let iter = values.into_iter();
    let total: f64 = iter.clone().filter(|v| **v > 0.0).fold(0.0, |acc, v| acc + v);
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }
    iter.filter(|v| **v > 0.0).fold(0.0, |acc, &v| {
        let p = v / total;
        acc - p * p.log2()
    })
}

/// Relative closeness test with no absolute tolerance.
///
/// Against zero this only holds for an exact zero.
pub fn is_close(a: f64, b: f64, rel_tol: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= rel_tol * a.abs().max(b.abs())
}
