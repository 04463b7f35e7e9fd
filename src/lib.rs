//! # Firebird Extraction Runner
//!
//! An unattended job runner that executes a query against a Firebird database
//! on a timer and materializes each result set to a CSV, tab-separated text,
//! or XLSX file, until it is told to stop.
//!
//! This crate follows the **Hexagonal Architecture** (Ports and Adapters):
//! the `application::job_runner` only talks to the `ports` traits, and the
//! `infrastructure` adapters plug Firebird and the local filesystem into them.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ports;
