use anyhow::Result;

use crate::filing::{FilingMetadata, RawFiling};

/// Downloads one filing's primary document. Network access, rate limiting
/// and retry policy all live behind this trait; the parsing engine only
/// consumes the result.
pub trait FilingFetcher {
    fn fetch(&self, metadata: &FilingMetadata) -> Result<RawFiling>;
}

/// Company directory lookup: resolves a company identifier (CIK) to its
/// filing history, most recent first.
pub trait TickerClient {
    fn list_filings(&self, cik: &str) -> Result<Vec<FilingMetadata>>;
}
