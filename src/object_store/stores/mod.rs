pub mod cloudinary;
pub mod local;

pub use cloudinary::CloudinaryStore;
pub use local::LocalObjectStore;
