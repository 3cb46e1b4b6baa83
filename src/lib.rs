pub mod analysis;
pub mod config;
pub mod html;
pub mod normalize;
pub mod report;
pub mod roster;
