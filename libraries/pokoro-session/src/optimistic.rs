//! Optimistic local updates with rollback
//!
//! ```text
//! begin:  apply(mutation)            (visible immediately)
//! remote: await store round-trip
//! settle: on failure apply(inverse(mutation))
//! ```

/// A local change that can be undone exactly
pub trait Reversible {
    /// State the mutation applies to
    type Target;

    /// Apply the change
    fn apply_to(&self, target: &mut Self::Target);

    /// The change that undoes this one
    fn inverse(&self) -> Self;
}

/// A mutation applied locally, awaiting remote confirmation
#[derive(Debug)]
#[must_use = "settle the pending mutation once the remote call resolves"]
pub struct Pending<M> {
    mutation: M,
}

impl<M: Reversible> Pending<M> {
    /// Mutation that was applied
    pub fn mutation(&self) -> &M {
        &self.mutation
    }

    /// Keep the change on success, revert it on failure
    ///
    /// Returns `true` if the change was rolled back.
    pub fn settle<T, E>(self, target: &mut M::Target, outcome: &Result<T, E>) -> bool {
        if outcome.is_err() {
            self.mutation.inverse().apply_to(target);
            true
        } else {
            false
        }
    }
}

/// Apply a mutation locally ahead of the remote call
pub fn begin<M: Reversible>(target: &mut M::Target, mutation: M) -> Pending<M> {
    mutation.apply_to(target);
    Pending { mutation }
}
