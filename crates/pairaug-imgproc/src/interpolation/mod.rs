//! Pixel interpolation methods for image transformations.
//!
//! [`InterpolationMode`] selects the resampling filter of
//! [`resize_fast`](crate::resize::resize_fast):
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//! - **Bicubic**: Catmull-Rom cubic interpolation over a 4x4 neighborhood
//! - **Area**: Pixel-area averaging, meant for downscaling
//!
//! Warps sample bilinearly. Neighbors that fall outside of the image take a `border` value,
//! so warps can expose a constant fill color.

mod bilinear;
mod interpolate;

pub(crate) use bilinear::bilinear_interpolation;
pub use interpolate::InterpolationMode;
