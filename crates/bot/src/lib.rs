//! Discord front end for the channel sentinel.
//!
//! `context` owns the long-lived poll loop; `handler` wires serenity gateway
//! events to it and to the `!latest-airdrop` command.

pub mod context;
pub mod handler;
