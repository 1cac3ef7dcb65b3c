//! Process control commands.

pub mod restart;
pub mod start;
pub mod stop;
