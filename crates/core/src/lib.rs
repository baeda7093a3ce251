//! Core business logic for Ledgerline.
//!
//! This crate contains pure business logic with ZERO file, network or UI
//! dependencies. Callers hand it an in-memory batch and get a report back.
//!
//! # Modules
//!
//! - `voucher` - Journal-voucher batch validation
//! - `adapter` - Mapping of loosely-typed tabular rows onto entries

pub mod adapter;
pub mod voucher;
