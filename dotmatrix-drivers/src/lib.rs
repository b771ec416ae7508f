//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in dotmatrix-core:
//!
//! - Shift-register cascades (74HC595-style, latch-framed)

#![no_std]
#![deny(unsafe_code)]

pub mod shift_register;
