pub mod skeleton;

pub use skeleton::Skeleton;
