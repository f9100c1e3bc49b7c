#![allow(dead_code)]

pub mod feed;
pub mod harness;
