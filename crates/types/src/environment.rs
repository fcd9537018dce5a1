//! Immutable description of the display environment a layout is computed for.
use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum SizeClass {
    #[default]
    Unspecified,
    Compact,
    Regular,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum InterfaceIdiom {
    #[default]
    Unspecified,
    Phone,
    Pad,
    Tv,
    CarPlay,
    Mac,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum ForceTouchCapability {
    #[default]
    Unknown,
    Unavailable,
    Available,
}

/// A snapshot of platform traits attached to every layout context.
///
/// Snapshots are never edited in place. The `with_*` methods return a new
/// value, which is then pushed down the element tree by the propagation pass.
/// Equality compares every field exactly, except that a NaN float equals
/// NaN so that every snapshot equals itself.
#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase", default)]
pub struct TraitSnapshot {
    pub display_scale: f32,
    pub horizontal_size_class: SizeClass,
    pub vertical_size_class: SizeClass,
    pub interface_idiom: InterfaceIdiom,
    pub force_touch_capability: ForceTouchCapability,
    pub container_size: Size,
}

impl TraitSnapshot {
    pub const DEFAULT: TraitSnapshot = TraitSnapshot {
        display_scale: 0.0,
        horizontal_size_class: SizeClass::Unspecified,
        vertical_size_class: SizeClass::Unspecified,
        interface_idiom: InterfaceIdiom::Unspecified,
        force_touch_capability: ForceTouchCapability::Unknown,
        container_size: Size::ZERO,
    };

    /// A NaN scale is stored as `0`, the unspecified scale.
    pub fn with_display_scale(self, display_scale: f32) -> Self {
        Self {
            display_scale: if display_scale.is_nan() { 0.0 } else { display_scale },
            ..self
        }
    }

    pub fn with_size_classes(self, horizontal: SizeClass, vertical: SizeClass) -> Self {
        Self {
            horizontal_size_class: horizontal,
            vertical_size_class: vertical,
            ..self
        }
    }

    pub fn with_interface_idiom(self, interface_idiom: InterfaceIdiom) -> Self {
        Self {
            interface_idiom,
            ..self
        }
    }

    pub fn with_force_touch_capability(self, force_touch_capability: ForceTouchCapability) -> Self {
        Self {
            force_touch_capability,
            ..self
        }
    }

    pub fn with_container_size(self, container_size: Size) -> Self {
        Self {
            container_size,
            ..self
        }
    }
}

impl PartialEq for TraitSnapshot {
    fn eq(&self, other: &Self) -> bool {
        same_value(self.display_scale, other.display_scale)
            && self.horizontal_size_class == other.horizontal_size_class
            && self.vertical_size_class == other.vertical_size_class
            && self.interface_idiom == other.interface_idiom
            && self.force_touch_capability == other.force_touch_capability
            && same_value(self.container_size.width, other.container_size.width)
            && same_value(self.container_size.height, other.container_size.height)
    }
}

fn same_value(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl Default for TraitSnapshot {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TraitSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{scale={}, hsc={:?}, vsc={:?}, idiom={:?}, forceTouch={:?}, container={}}}",
            self.display_scale,
            self.horizontal_size_class,
            self.vertical_size_class,
            self.interface_idiom,
            self.force_touch_capability,
            self.container_size
        )
    }
}
