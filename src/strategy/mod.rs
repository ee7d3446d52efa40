//! Ordering policies that decide which debt receives surplus budget first.

pub mod policy;
