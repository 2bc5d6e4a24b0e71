//! Aztec Virtual Machine implementation in Rust

#![forbid(unsafe_code, unused_variables)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use avm_core::*;
pub use avm_gasometer as gasometer;

#[cfg(feature = "tracing")]
pub mod tracing;

pub mod backend;
mod config;
mod context;
pub mod eval;
mod executor;
mod frame;
mod handler;
mod revert;

pub use crate::config::Config;
pub use crate::context::{EnvVar, ExecutionEnvironment, GlobalVariables};
pub use crate::eval::{CallRequest, Control};
pub use crate::executor::{ExecutionResult, Executor};
pub use crate::frame::{Capture, Frame};
pub use crate::handler::{ContractLoader, Host, WorldState};
pub use crate::revert::RevertReason;
