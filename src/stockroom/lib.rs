//! # Stockroom Architecture
//!
//! Stockroom is a small inventory manager: products, the users allowed to
//! touch them, and the roles those users carry. Everything lives in flat
//! JSON files inside one data directory.
//!
//! Like any UI-agnostic library, the core never talks to a terminal. The CLI
//! in `main.rs` is one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Installs the tracing subscriber                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Checks the session role before mutating anything         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, filtering, user-facing messages              │
//! │  - Returns `CmdResult`                                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Generic `RecordStore<T, B>` over a `StorageBackend`      │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain arguments and returns
//! `Result<CmdResult>`. It **never** prints and **never** exits the process.
//! File access happens only through a `StorageBackend`, plus the small
//! `config.json` and `session.json` files next to the stores.
//!
//! ## Testing Strategy
//!
//! 1. **Commands and store**: unit tests against `MemBackend`.
//! 2. **API**: role gating and dispatch.
//! 3. **CLI**: end-to-end runs of the binary in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, with role checks, for every operation
//! - [`commands`]: Validation, filtering and messages per entity
//! - [`store`]: `RecordStore` plus the file and in-memory backends
//! - [`model`]: `Product`, `User`, `Role` and their patch types
//! - [`validation`]: First-failure form checks
//! - [`auth`]: Login lookup and the `admin` gate
//! - [`session`]: The `session.json` login record
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod validation;
