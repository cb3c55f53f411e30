mod error;
mod fountain;
mod memory;

pub use error::FountainError;
pub use fountain::Fountain;
pub use memory::MemoryFountain;
