//! Pure conversion stages applied to extracted slides.

pub mod layout;
pub mod markdown;
pub mod style_map;
