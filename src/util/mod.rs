//! Utility functions

/// Apply `step` starting from `seed` while `predicate` holds.
///
/// Returns the first element of `seed, step(seed), step(step(seed)), ...`
/// for which `predicate` is false.
///
/// Termination is the caller's obligation: the orbit must reach a value
/// failing `predicate`. Nothing here detects a fixpoint.
pub fn iterate_until<T, P, F>(predicate: P, step: F, seed: T) -> T
where
    P: Fn(&T) -> bool,
    F: Fn(&T) -> T,
{
    let mut value = seed;
    while predicate(&value) {
        value = step(&value);
    }
    value
}
