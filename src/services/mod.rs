pub mod detail_page;
pub mod extractor;
pub mod layers;
pub mod scanner;

pub use extractor::BasicInfo;
pub use scanner::ScanOutcome;
