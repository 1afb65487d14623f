pub mod alloc;
pub mod benchmark;
pub mod stats;

pub use alloc::{AllocCounters, CountingAllocator};
pub use benchmark::AllocationBenchmark;
pub use stats::{MemoryDelta, MemorySnapshot, RuntimeStats};

#[global_allocator]
pub static ALLOCATOR: CountingAllocator = CountingAllocator::new();
