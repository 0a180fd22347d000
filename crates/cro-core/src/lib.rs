//! # cro-core
//!
//! Core types, ID generation, and error types for the CRO field tracker.
//!
//! This crate provides the foundational types shared across all crates:
//! - Entity structs (tasks, checklist item states, categories, notifications)
//! - Status enums with state machine transitions
//! - ID prefix constants and formatting helpers
//! - Cross-cutting error types
//! - Trail operation envelope for JSONL persistence

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod trail;
