// Copyright 2021-Present Hyperjump Technology. https://hyperjump.tech/
// SPDX-License-Identifier: MIT

//! Reporting pipeline between a Monika agent's local probe history and a
//! remote Symon collector.
//!
//! One reporting cycle pulls a bounded batch of unreported request and
//! notification logs from the history store, shapes them into the Symon wire
//! schema, delivers them as a gzip-compressed JSON payload, and only then
//! marks the batch as reported. Records that were never acknowledged are
//! picked up again on the next cycle, so delivery is at-least-once across
//! cycles. Scheduling of cycles is the caller's responsibility.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod config;
pub mod error;
pub mod history;
pub mod hostname;
pub mod payload;
pub mod reporter;
pub mod symon;
