pub mod header;
pub mod section;
pub mod strip;

use encoding_rs::{Encoding, UTF_8};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use crate::document::{Document, DocumentChunk, MetaValue, MetadataMap};
use crate::error::ParsingError;
use crate::filing::{FilingMetadata, RawFiling};

pub const SEC_BASE_URL: &str = "https://www.sec.gov";
pub const SEC_DATA_URL: &str = "https://data.sec.gov";
pub const TICKER_FILE_PATH: &str = "/files/company_tickers_exchange.json";

pub const TEN_K_FORM: &str = "10-K";
pub const TEN_Q_FORM: &str = "10-Q";
pub const IX_HEADER_TAG: &str = "ix:header";

/// Recognizes 10-K item headings like "Item 1A. Risk Factors". The title
/// character class is deliberately narrow so that prose mentioning
/// "Item 3," does not open a section; headings with unusual punctuation
/// are missed as a consequence.
pub static TEN_K_ITEMS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*Item\s+[0-9][0-9]?[A-C]?.?\s+[a-z\[\]'"´`,;: A-Z-]+\s*$"#)
        .expect("invalid 10-K items pattern")
});

/// 10-Q counterpart of [`TEN_K_ITEMS_REGEX`]. Not wired into the form
/// allowlist yet.
pub static TEN_Q_ITEMS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*Item\s+[1-6]A?.?\s+[a-z\[\]'"´`,;: A-Z-]+\s*$"#)
        .expect("invalid 10-Q items pattern")
});

/// Converts a downloaded 10-K filing into a structured [`Document`] using
/// the built-in item pattern as both begin and end boundary.
pub fn convert_filing(filing: RawFiling) -> Result<Document, ParsingError> {
    convert_filing_with(filing, None, &TEN_K_ITEMS_REGEX, &TEN_K_ITEMS_REGEX)
}

/// Full-control variant of [`convert_filing`]: explicit charset label
/// (UTF-8 when `None`) and begin/end boundary patterns.
///
/// The form allowlist is checked before the content is touched. Header
/// extraction runs before stripping, which keeps inline styling inside the
/// extracted header intact.
pub fn convert_filing_with(
    filing: RawFiling,
    charset: Option<&str>,
    begin: &Regex,
    end: &Regex,
) -> Result<Document, ParsingError> {
    let form = filing.metadata.form.as_deref().unwrap_or("unknown");
    if form != TEN_K_FORM {
        return Err(ParsingError::UnsupportedForm {
            form: form.to_string(),
            supported: TEN_K_FORM,
        });
    }

    debug!(
        "converting filing {} ({} bytes)",
        filing
            .metadata
            .accession_number
            .as_deref()
            .unwrap_or("<no accession number>"),
        filing.content.len()
    );

    let text = decode_content(&filing.content, charset)?;
    let mut html = Html::parse_document(&text);

    let xbrl = header::extract_xbrl_header(&mut html);
    strip::strip_filing_html(&mut html);

    let base = filing_metadata_map(&filing.metadata);

    let mut header_metadata = base.clone();
    header_metadata.insert("documentType".to_string(), MetaValue::from("XBRL_HEADER"));
    let header_chunk = DocumentChunk::new(
        String::from_utf8_lossy(&xbrl).into_owned(),
        header_metadata,
    );

    let items = section::extract_form_items(&html, begin, end, &base);
    debug!("segmented filing into {} form items", items.len());

    Ok(Document::new(Some(header_chunk), items, base))
}

fn decode_content(content: &[u8], charset: Option<&str>) -> Result<String, ParsingError> {
    let encoding = match charset {
        Some(label) => Encoding::for_label(label.as_bytes())
            .ok_or_else(|| ParsingError::Parse(format!("unknown charset label: {}", label)))?,
        None => UTF_8,
    };

    let (text, _, had_errors) = encoding.decode(content);
    if had_errors {
        return Err(ParsingError::Parse(format!(
            "content is not valid {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

/// Base metadata for every chunk of a filing. Absent fields are omitted,
/// never stored as placeholders.
fn filing_metadata_map(metadata: &FilingMetadata) -> MetadataMap {
    let mut map = MetadataMap::new();
    {
        let mut put = |key: &str, value: &Option<String>| {
            if let Some(value) = value {
                map.insert(key.to_string(), MetaValue::from(value.clone()));
            }
        };
        put("cik", &metadata.cik);
        put("companyName", &metadata.name);
        put("accessionNumber", &metadata.accession_number);
        put("filingDate", &metadata.filing_date);
        put("reportDate", &metadata.report_date);
        put("form", &metadata.form);
        put("primaryDocument", &metadata.primary_document);
    }
    map
}
