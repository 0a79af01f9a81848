pub mod pass;

pub use pass::post_build;
