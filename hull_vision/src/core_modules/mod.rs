pub mod bounding_box;
pub mod caliper_frame;
pub mod device_kernel;
pub mod error;
pub mod gift_wrapper;
pub mod host_kernel;
pub mod hull_buffer;
pub mod orientation;
pub mod point;
pub mod point_batch;
pub mod rotating_calipers;
pub mod rotation;
pub mod utils;
