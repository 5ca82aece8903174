//! # IO Module
//!
//! Interface layer that exposes the car operations over HTTP. Pure
//! translation: request extraction in, status code and JSON body out.

pub mod rest;

pub use rest::*;
