mod picture;
mod picture_store;

pub use picture::Picture;
pub use picture_store::{PictureStore, StoreError};
