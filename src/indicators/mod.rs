pub mod indicator_overlay;
pub mod price_levels;
pub mod shape;
