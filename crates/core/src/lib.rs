#![deny(warnings)]

//! Text to sign-language animation sequencing.
//!
//! [`sequence::build_sequence`] turns text into timed avatar clips and
//! [`frame::evaluate_frame`] turns one clip plus elapsed time into a pose.

pub mod catalog;
pub mod challenge;
pub mod config;
pub mod easter;
pub mod frame;
pub mod live;
pub mod request;
pub mod segment;
pub mod sequence;
pub mod suggest;
pub mod variation;
