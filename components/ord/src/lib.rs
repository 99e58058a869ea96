#![allow(dead_code)]

#[macro_use]
extern crate serde_derive;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

pub mod charm;
pub mod envelope;
pub mod inscription;
pub mod inscription_id;
pub mod object_id;
pub mod sat_point;
pub mod tag;

pub const SUBSIDY_HALVING_INTERVAL: u32 = 210_000;
pub const FIRST_POST_SUBSIDY_EPOCH: u32 = 33;
pub const COIN_VALUE: u64 = 100_000_000;
pub const JUBILEE_HEIGHT: u64 = 824_544;
