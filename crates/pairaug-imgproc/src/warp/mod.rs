//! Geometric image transformations using affine warps.
//!
//! This module provides functions for applying 2D transformations to images:
//!
//! - Affine transformations with a constant border value
//! - Rotation matrix generation
//! - Affine transform inversion
//! - Rotation with canvas expansion, so no corner of the source is clipped
//!
//! # Examples
//!
//! Rotating an image by 45 degrees:
//!
//! ```no_run
//! use pairaug_imgproc::warp::get_rotation_matrix2d;
//!
//! let rotation_matrix = get_rotation_matrix2d((128.0, 128.0), 45.0, 1.0);
//! // Use with warp_affine to rotate the image
//! ```

mod affine;

pub use affine::{
    get_rotation_matrix2d, invert_affine_transform, rotate_expand, rotated_bounds, warp_affine,
};
