pub mod mock_path_store;

#[allow(unused_imports)]
pub use mock_path_store::*;
