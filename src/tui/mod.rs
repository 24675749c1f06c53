pub mod app;
pub mod icons;
pub mod input;
pub mod render;
pub mod theme;

pub use app::run;
