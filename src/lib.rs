//! Client-side presentation layer for the VoteWise election app.
//!
//! The controllers here are the page scripts, rewritten as testable state
//! machines: the ballot wizard (selection ledger, step cursor, countdown,
//! confirmation and one-shot submission), the public results poller, and
//! the thin dashboard utilities (tab switcher, chart configs, table
//! filter, login form UX). Nothing in this crate touches rendered
//! elements; commands come in, events go out over the bus, and the view
//! layer does the rendering.

pub mod ballot;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod login;
pub mod messaging;
pub mod results;
pub mod session;
pub mod wizard;
