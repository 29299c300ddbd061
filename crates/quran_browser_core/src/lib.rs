pub mod aggregator;
pub mod catalog;
pub mod daily;
pub mod domain;
pub mod pagination;
pub mod ports;

#[cfg(test)]
mod test_helpers;

pub use aggregator::{VerseAggregator, VerseError};
pub use catalog::{ReciterCatalog, SurahCatalog};
pub use daily::DailyVerseSelector;
pub use domain::{
    AudioOption, DailyVerse, Notice, Reciter, RevelationPlace, Settings, Surah, SurahDetail,
    SurahListing, TafsirEntry, TafsirPreview, Theme, UserPreferences, Verse, VerseKey, VerseMark,
    VerseViewModel,
};
pub use pagination::{PageWindow, Pagination};
pub use ports::{
    NotificationSink, PortError, PortResult, PreferenceStore, QuranResourceClient,
};
