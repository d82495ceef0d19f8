//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the analysis engine MUST go through this module.
//! Seeding a process-wide generator is forbidden; every simulation call owns
//! its generator, and every trial derives its own sub-stream from the run
//! seed and trial index.

mod xorshift;

pub use xorshift::RngManager;
