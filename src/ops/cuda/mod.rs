//! CUDA implementations of operation traits

mod random;
