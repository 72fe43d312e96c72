// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod classify;
pub mod config;
pub mod db;
pub mod executor;
pub mod generator;
pub mod inserts;
pub mod metadata;
pub mod output;
pub mod serialize;
