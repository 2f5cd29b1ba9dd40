//! End-to-end tests for the ong-console session core.
//!
//! Each test spins up a stub backend on an ephemeral local port and drives
//! the real HTTP clients, the file-backed credential store, the session
//! manager, and the route guard against it.

mod common;

mod auth_flows;
