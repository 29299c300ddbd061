pub mod notices;
pub mod preferences;
pub mod quran_http;

pub use notices::NoticeBoard;
pub use preferences::InMemoryPreferenceStore;
pub use quran_http::HttpQuranClient;
