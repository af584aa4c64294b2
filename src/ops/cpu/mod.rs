//! CPU implementations of operation traits

mod random;
