pub mod environment;
pub mod geometry;

pub use environment::{ForceTouchCapability, InterfaceIdiom, SizeClass, TraitSnapshot};
pub use geometry::{
    Axis, Point, Rect, Size, points_valid_for_layout, position_points_valid_for_layout,
    position_valid_for_layout, rect_valid_for_layout, size_valid_for_layout,
};
