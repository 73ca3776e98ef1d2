pub mod load;
pub mod normalize;
pub mod search;
pub mod stats;
pub mod version;
