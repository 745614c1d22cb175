pub mod fold;
pub mod paths;
