#![no_std]

//! Client-side state machine for the number guessing game.
//!
//! The scoring service decides everything about a game. This crate mirrors its session, validates input before it
//! leaves the browser, and describes what the page should show, without depending on any browser API.

extern crate alloc;

pub use guessr_protocol::*;

pub use client::*;
pub use confetti::*;
pub use error::*;
pub use guess::*;
pub use reply::*;
pub use timer::*;
pub use view::*;

mod client;
mod confetti;
mod error;
mod guess;
mod reply;
mod timer;
mod view;
