use crate::store::JsonStore;

#[derive(Clone)]
pub struct AppState {
    pub store: JsonStore,
}
