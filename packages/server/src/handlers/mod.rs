pub mod health;
pub mod marketing;
pub mod media;
pub mod seo;
pub mod storage;
