#![doc = include_str!("../README.md")]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod client;
pub mod registry;

pub use client::{EpcClient, parse_body};
pub use registry::{MockFailure, MockRegistry, Registry};
