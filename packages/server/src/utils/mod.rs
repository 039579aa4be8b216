pub mod blog_stats;
pub mod hash;
pub mod jwt;
