#![doc = include_str!("../README.md")]

extern crate nullomer;

pub mod corpus;
pub mod error;
pub mod fmt;
pub mod motifs;
pub mod peptides;
