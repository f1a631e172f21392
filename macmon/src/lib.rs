//! macmon: local system metrics served as MCP tools.
//!
//! The [`sampler`] reads raw samples through sysinfo, [`report`] and [`alerts`] turn
//! them into text, [`tools`] maps tool names to handlers and [`server`] speaks MCP.

pub mod alerts;
pub mod config;
pub mod format;
pub mod report;
pub mod sampler;
pub mod selftest;
pub mod server;
pub mod tools;
pub mod types;
