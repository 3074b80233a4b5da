// src/models/chemical.rs

//! Chemical record data structure.

use serde::{Deserialize, Serialize};

/// Default template for the canonical external reference of a record.
pub const DEFAULT_REFERENCE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/compound/{cid}";

/// A compound with its odor descriptors, as shipped in the static index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChemicalRecord {
    /// PubChem compound identifier
    #[serde(rename = "cid")]
    pub id: u64,

    /// Common or trivial name
    pub name: String,

    /// SMILES structure string
    #[serde(rename = "smiles")]
    pub structure: String,

    /// Odor terms, in source order (duplicates preserved)
    pub descriptors: Vec<String>,

    /// Provenance of the descriptors
    pub sources: Vec<String>,
}

impl ChemicalRecord {
    /// Identifier as shown to users, e.g. `CID_440917`.
    pub fn display_id(&self) -> String {
        format!("CID_{}", self.id)
    }

    /// Canonical reference URL built from `template`.
    pub fn reference_url(&self, template: &str) -> String {
        reference_url(template, self.id)
    }

    /// First `limit` descriptors followed by a `+N` overflow marker.
    pub fn descriptor_preview(&self, limit: usize) -> String {
        preview(&self.descriptors, limit)
    }

    /// First `limit` sources followed by a `+N` overflow marker.
    pub fn source_preview(&self, limit: usize) -> String {
        preview(&self.sources, limit)
    }

    /// Format the record for display using a template.
    ///
    /// Supported placeholders:
    /// - `{cid}`, `{name}`, `{smiles}`
    /// - `{descriptors}`, `{sources}` (comma separated)
    /// - `{url}` (default reference URL)
    pub fn format(&self, template: &str) -> String {
        self.format_with(template, DEFAULT_REFERENCE_URL)
    }

    /// Like [`format`](Self::format), with `{url}` built from `reference_template`.
    ///
    /// Placeholders are expanded in one pass; text coming from the record is
    /// never expanded again.
    pub fn format_with(&self, template: &str, reference_template: &str) -> String {
        let mut out = String::with_capacity(template.len() + 64);
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            let Some(end) = tail.find('}') else {
                rest = tail;
                break;
            };

            let value = match &tail[1..end] {
                "cid" => Some(self.display_id()),
                "name" => Some(self.name.clone()),
                "smiles" => Some(self.structure.clone()),
                "descriptors" => Some(self.descriptors.join(", ")),
                "sources" => Some(self.sources.join(", ")),
                "url" => Some(self.reference_url(reference_template)),
                _ => None,
            };
            match value {
                Some(value) => {
                    out.push_str(&value);
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Expand a reference URL template for a compound id.
pub fn reference_url(template: &str, id: u64) -> String {
    template.replace("{cid}", &id.to_string())
}

fn preview(items: &[String], limit: usize) -> String {
    let shown = items.iter().take(limit).map(String::as_str).collect::<Vec<_>>();
    let hidden = items.len().saturating_sub(limit);
    match (shown.is_empty(), hidden) {
        (_, 0) => shown.join(", "),
        (true, n) => format!("+{n}"),
        (false, n) => format!("{} +{n}", shown.join(", ")),
    }
}
