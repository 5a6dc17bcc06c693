pub mod memory;
pub mod mongo;
