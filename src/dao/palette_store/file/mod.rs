mod error;
mod store;

#[allow(unused_imports)]
pub use error::FileDaoError;
#[allow(unused_imports)]
pub use store::FilePaletteStore;
