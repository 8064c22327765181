pub mod assets;
pub mod media;
pub mod seo;
pub mod storage;
