pub mod marketing;
pub mod seo;
