//! Rule-set loading
//!
//! The vendor-specific normalizers live upstream; this module only reads
//! their output: already-normalized rule records, either as CSV lines in the
//! column order `protocol,src,s_port,dest,d_port,action` or as a JSON array
//! of records with the same fields. Indices are assigned by record order.
//!
//! A malformed record aborts that rule set's load and surfaces the offending
//! line to the caller; independent rule sets (other files in a batch) are
//! unaffected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::core::policy::Policy;

/// One rule record as the upstream normalizers emit it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRecord {
    pub protocol: String,
    pub src: String,
    #[serde(alias = "s_port")]
    pub sport: String,
    #[serde(alias = "dest")]
    pub dst: String,
    #[serde(alias = "d_port")]
    pub dport: String,
    pub action: String,
}

impl RuleRecord {
    fn into_policy(self, index: usize) -> Result<Policy> {
        Policy::parse(
            index,
            &self.protocol,
            &self.src,
            &self.sport,
            &self.dst,
            &self.dport,
            &self.action,
        )
    }
}

/// Loads a rule set from a file, dispatching on the `.json` extension and
/// treating everything else as CSV.
///
/// # Errors
///
/// I/O failures, JSON deserialization failures, and per-record
/// `Parse`/`Validation` errors.
pub fn load_path(path: &Path) -> Result<Vec<Policy>> {
    let text = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_json(&text)
    } else {
        parse_csv(&text)
    }
}

/// Parses CSV text in the order `protocol,src,s_port,dest,d_port,action`.
///
/// Blank lines and `#` comments are skipped; a leading header line is
/// detected by its `protocol` column name and skipped.
///
/// # Errors
///
/// `Error::Parse` naming the offending line for a wrong column count, plus
/// any field-level `Parse`/`Validation` error.
pub fn parse_csv(text: &str) -> Result<Vec<Policy>> {
    let mut policies = Vec::new();
    let mut saw_record = false;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if !saw_record && fields.first().is_some_and(|f| f.eq_ignore_ascii_case("protocol")) {
            tracing::debug!("skipping CSV header line");
            continue;
        }
        if fields.len() != 6 {
            return Err(Error::parse(
                line,
                format!("expected 6 comma-separated fields, found {}", fields.len()),
            ));
        }
        saw_record = true;
        let record = RuleRecord {
            protocol: fields[0].to_string(),
            src: fields[1].to_string(),
            sport: fields[2].to_string(),
            dst: fields[3].to_string(),
            dport: fields[4].to_string(),
            action: fields[5].to_string(),
        };
        policies.push(record.into_policy(policies.len())?);
    }
    tracing::debug!(rules = policies.len(), "parsed CSV rule set");
    Ok(policies)
}

/// Parses a JSON array of rule records.
///
/// # Errors
///
/// `Error::Serialization` for malformed JSON, plus any field-level
/// `Parse`/`Validation` error.
pub fn parse_json(text: &str) -> Result<Vec<Policy>> {
    let records: Vec<RuleRecord> = serde_json::from_str(text)?;
    let policies = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_policy(index))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(rules = policies.len(), "parsed JSON rule set");
    Ok(policies)
}
