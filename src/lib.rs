//! Seva Guide - Guided FAQ assistant for a government e-service portal
//!
//! This crate drives a menu-based help flow over a fixed knowledge base
//! (service -> category -> question -> answer) and offers free-text
//! semantic search over the same knowledge base via vector embeddings.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
