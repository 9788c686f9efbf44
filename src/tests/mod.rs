//! Crate-level tests: fixed vectors and algebraic properties.

mod properties;
