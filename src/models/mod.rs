pub mod block;
pub mod draw;
pub mod slide;
pub mod style;
