//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`,
//! `strum`, `typed-builder`). Keep it lean: no I/O, networking, or heavy logic, just data and
//! simple helpers.
//!
//! * [`feature`]: contract features with their risk and compatibility metadata.
//! * [`parameter`]: typed constructor parameters a feature asks for.
//! * [`standard`]: token standards and standard sets.
//! * [`config`]: application configuration shared by the apps.

pub mod config;
pub mod constants;
pub mod feature;
pub mod parameter;
pub mod standard;
