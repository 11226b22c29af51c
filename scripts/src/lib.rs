//! Scripts for deploying the OctoChest token and marketplace contracts, and
//! for running operator tasks against the deployed contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
mod commands;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod deployments;
pub mod errors;
pub mod plan;
mod solidity;
pub mod tasks;
pub mod types;
pub mod utils;
