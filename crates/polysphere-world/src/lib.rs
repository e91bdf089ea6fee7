//! Multi-level geodesic worlds: the sphere hierarchy, cross-level region and edge resolution, border snapshots, and polygon coloring.

mod border;
mod error;
mod hierarchy;
mod palette;
mod settings;

pub use border::{BorderKind, BorderMask, BorderSnapshot, DrawMask};
pub use error::WorldError;
pub use hierarchy::SphereHierarchy;
pub use palette::{Coloring, NEIGHBOR_COLORS, highlight_selection, polygon_colors, smoothing_border};
pub use settings::{SettingsChange, WorldSettings};
