//! Generic structures with no interpretation fixed by the library.

pub mod index_heap;
pub mod luby;
pub mod minimal_pcg;
