//! Classification engine: bucket mapping, collision resolution, traversal
//! and the actual copy executor.

mod atomic;
mod bucket;
mod copy;
mod helpers;
mod io_copy;
mod metadata;
mod resolve;
mod util;
mod walk;

pub use bucket::{bucket_dir, extension_token};
pub use copy::copy_file;
pub use resolve::{MAX_CHAIN_TRIES, ResolvedAction, resolve};
pub use walk::{ClassifyStats, classify_tree};
