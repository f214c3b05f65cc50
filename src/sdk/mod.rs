pub mod config;
pub mod distance;
pub mod region;
pub mod selection;
pub mod util;
pub mod widget;
