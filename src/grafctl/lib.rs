//! # grafctl Architecture
//!
//! grafctl backs up and restores Grafana dashboards: it pulls dashboard
//! definitions into JSON files and pushes edited files back through the HTTP
//! API. The library holds everything but the terminal; the binary adds
//! argument parsing, dispatch and rendering on top.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Global options, command registry, dispatch               │
//! │  - The ONLY place that knows about stdout/exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - get / push / list logic, push reconciliation             │
//! │  - Returns CmdResult, logs progress through tracing         │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                               │
//!                 ▼                               ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Dashboard ops (dashboard.rs) │ │  Local store (store.rs)   │
//! │  list / get / save / delete   │ │  <root>/*.json, db/*.json │
//! └───────────────────────────────┘ └───────────────────────────┘
//!                 │
//!                 ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Client (client/)                                       │
//! │  - Auth, extra headers, URL joining, status checking        │
//! │  - Transport trait: HttpTransport, MemoryTransport          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous and sequential. The [`client::Client`] is
//! immutable after construction.
//!
//! ## Testing Strategy
//!
//! Commands and dashboard operations are tested against
//! [`client::MemoryTransport`], which answers from canned responses and
//! records every request. The binary is exercised end to end with
//! `assert_cmd` for everything that needs no live service.
//!
//! ## Module Overview
//!
//! - [`client`]: HTTP client, credentials, transports
//! - [`dashboard`]: Dashboard types and REST operations
//! - [`commands`]: Business logic for `get`, `push` and `list`
//! - [`store`]: On-disk dashboard layout
//! - [`config`]: Global options and environment overrides
//! - [`error`]: Error types

pub mod client;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod store;
