//! Chat domain API handlers

pub mod webhook;
