//! Shared utilities for the evalsheet workspace.

pub mod config;
