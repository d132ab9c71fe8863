use crate::{config::StatusMode, db::PictureStore};

#[derive(Clone)]
pub struct AppState {
    pub store: PictureStore,
    pub status_mode: StatusMode,
}
