use crate::search::SearchService;

/// Shared handler state / 共享状态
pub struct AppState {
    pub search: SearchService,
}

impl AppState {
    pub fn new(search: SearchService) -> Self {
        Self { search }
    }
}
