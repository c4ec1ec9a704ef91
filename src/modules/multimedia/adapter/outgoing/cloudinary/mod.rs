mod cloudinary_config;
mod media_store_cloudinary;
mod signature;

pub use cloudinary_config::CloudinaryConfig;
pub use media_store_cloudinary::CloudinaryMediaStore;
