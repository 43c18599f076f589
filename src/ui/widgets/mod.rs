pub mod daily;
pub mod help;
pub mod hero;
pub mod hourly;
pub mod notice;
pub mod search;
mod shared;
