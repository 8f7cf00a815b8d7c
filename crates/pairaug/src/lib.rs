#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use pairaug_image as image;

#[doc(inline)]
pub use pairaug_imgproc as imgproc;

#[doc(inline)]
pub use pairaug_io as io;

#[doc(inline)]
pub use pairaug_augment as augment;

#[doc(inline)]
pub use pairaug_sketch as sketch;

#[doc(inline)]
pub use pairaug_dataset as dataset;
