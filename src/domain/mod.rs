pub mod series;
pub mod weather;
