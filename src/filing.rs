use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Metadata for one filing, as listed in the EDGAR submissions feed.
/// Field renames mirror the camelCase names of the JSON payload.
///
/// Two filings are the same filing when their (cik, accession number)
/// pairs are equal; the remaining fields do not participate in identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilingMetadata {
    pub cik: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "accessionNumber")]
    pub accession_number: Option<String>,
    #[serde(rename = "filingDate")]
    pub filing_date: Option<String>,
    #[serde(rename = "reportDate")]
    pub report_date: Option<String>,
    #[serde(rename = "acceptanceDateTime")]
    pub acceptance_date_time: Option<String>,
    pub act: Option<String>,
    pub form: Option<String>,
    #[serde(rename = "fileNumber")]
    pub file_number: Option<String>,
    #[serde(rename = "filmNumber")]
    pub film_number: Option<String>,
    pub items: Option<String>,
    #[serde(rename = "coreType")]
    pub core_type: Option<String>,
    pub size: Option<String>,
    #[serde(rename = "isXBRL")]
    pub is_xbrl: bool,
    #[serde(rename = "isInlineXBRL")]
    pub is_inline_xbrl: bool,
    #[serde(rename = "primaryDocument")]
    pub primary_document: Option<String>,
    #[serde(rename = "primaryDocDescription")]
    pub primary_doc_description: Option<String>,
}

impl PartialEq for FilingMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.cik == other.cik && self.accession_number == other.accession_number
    }
}

impl Eq for FilingMetadata {}

impl Hash for FilingMetadata {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cik.hash(state);
        self.accession_number.hash(state);
    }
}

/// One downloaded filing: metadata plus the undecoded primary document.
/// Consumed by value by the conversion pipeline.
#[derive(Debug)]
pub struct RawFiling {
    pub metadata: FilingMetadata,
    pub content: Vec<u8>,
}

impl RawFiling {
    pub fn new(metadata: FilingMetadata, content: Vec<u8>) -> Self {
        RawFiling { metadata, content }
    }
}
