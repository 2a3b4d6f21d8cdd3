mod bloom;
mod blocklist;
mod loader;

pub use bloom::BloomFilter;
pub use blocklist::Blocklist;
pub use loader::load;
