#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc)]

pub mod availability;
pub mod bar_standard;
pub mod calculator;
pub mod config;
pub mod error;
pub mod load_request;
pub mod load_result;
pub mod one_rep_max;
pub mod plate;
pub mod resolver;
pub mod rounding;
pub mod server;
pub mod waitlist;
