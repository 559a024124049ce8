//! # gatepass-core
//!
//! Core types, geodesy, and check evaluation for the hostel gate-pass backend.
//!
//! This crate provides the foundational types shared across all gatepass crates:
//! - Entity structs for users, gates, and visit logs
//! - Enums for directions, statuses, hostels, and roles, plus the presence
//!   state machine that drives IN/OUT sequencing
//! - ID prefix constants
//! - Haversine distance on a spherical Earth
//! - The gate check evaluator and its tagged rejections
//! - Response types shared by the HTTP surface and the CLI

pub mod check;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod geo;
pub mod ids;
pub mod responses;
