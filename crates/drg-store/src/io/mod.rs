//! Collection file I/O.

mod load;
mod save;

pub use load::load_collection;
pub use save::save_collection;
