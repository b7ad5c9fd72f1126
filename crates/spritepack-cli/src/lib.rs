//! SpritePack CLI library.
//!
//! This crate provides the command implementations behind the `spritepack`
//! binary: loading sprite images from disk, packing them, and writing the
//! atlas texture and lookup table.

pub mod commands;
pub mod input;
