// Copyright 2024-2025 Irreducible Inc.

//! Coefficient arithmetic and dense polynomial helpers for the multiplication strategies.
//!
//! This crate provides:
//!
//! * The [`Coefficient`] ring abstraction with fixed-width and arbitrary-precision integer
//!   implementations
//! * Padding, coefficient-wise addition and subtraction, and equality of coefficient vectors

mod coefficient;
mod poly;
#[doc(hidden)]
pub mod test_utils;

pub use coefficient::*;
pub use poly::*;
