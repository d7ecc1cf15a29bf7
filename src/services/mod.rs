pub mod response_parser;
pub mod result_aggregator;
pub mod scheme_provider;
pub mod scorer;

pub use response_parser::{parse_response, Outcome};
pub use result_aggregator::aggregate;
pub use scheme_provider::{FileSchemeProvider, SchemeProvider};
pub use scorer::{score, score_section};
