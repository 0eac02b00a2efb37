pub mod cell;
pub mod config;
pub mod detection;
pub mod easing;
pub mod ecosystem;
pub mod history;
pub mod motion;
pub mod raycast;
pub mod reproduction;
pub mod spatial;
pub mod traits;
