//! Core pipeline: scan local film files, derive a canonical identity per
//! file, search the ANT catalog for each title, and classify every file
//! as duplicate / partial duplicate / banned / not found / uploadable.

pub mod classifier;
pub mod config;
pub mod error;
pub mod ledger;
pub mod matcher;
pub mod media;
pub mod models;
pub mod normalizer;
pub mod orchestrator;
pub mod resolver;
pub mod scanner;
