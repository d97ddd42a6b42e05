//! Main module for codoc library functionality

pub mod analysis;
pub mod ast;
pub mod building;
pub mod diff;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod testing;
pub mod token;
