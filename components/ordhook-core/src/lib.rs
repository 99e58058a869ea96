#![allow(dead_code)]

#[macro_use]
extern crate serde_derive;

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod events;

pub use context::Context;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;
