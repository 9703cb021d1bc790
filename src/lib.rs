#[macro_use]
extern crate derive_more;

pub mod app;
pub mod basic;
pub mod error;
pub mod surface;
