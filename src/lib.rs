//! tagi18n - compile-time-checkable i18n for tagged templates
//!
//! Source code marks translatable text with tagged templates
//! (`` __`Hello ${name}` ``, `` __p(count)`# apples` ``). Every template maps to
//! a canonical key derived from its literal segments, so the set of keys can be
//! extracted statically and each locale catalog checked (or fixed) against it.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`check`, `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Key derivation, runtime resolution, extraction and reconciliation
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
