//! Field identity generation.
//!
//! Identities are drawn from the thread-local RNG with no uniqueness check
//! against other fields of the same store. Two fields can end up with the
//! same identity; at one in 10^15 per pair this is rare but possible.
//! Callers that need unique identities must check for collisions themselves.

use rand::Rng;

/// Largest identity produced by [`random_identity`].
pub const MAX_IDENTITY: u64 = 999_999_999_999_999;

/// Draws an identity uniformly from `[0, MAX_IDENTITY]`.
#[must_use]
pub fn random_identity() -> u64 {
    rand::thread_rng().gen_range(0..=MAX_IDENTITY)
}
