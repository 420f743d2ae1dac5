pub mod entities;
pub mod keywords;
pub mod stopwords;

pub use entities::extract_entities;
pub use keywords::KeywordExtractor;
