//! Main module for the gridfmt library functionality

pub mod ast;
pub mod config;
pub mod doc;
pub mod extension;
pub mod inspect;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod pipeline;
pub mod printer;
pub mod table;

#[cfg(test)]
pub mod testing;
