//! XML attribute mutation, persisted back to the source file.
//!
//! Four state-free operations: parse a document for display, add or
//! overwrite an attribute on matching elements, auto-number `id` attributes,
//! and delete an attribute. Matching is exact and non-recursive: only the
//! direct children of the document root are candidates.

use std::fs;
use std::path::Path;

use super::XmlDocument;
use crate::error::{XmlEditError, XmlEditResult};
use crate::pathlock;

/// Raw document text plus the distinct tag names present, in document
/// order. Used to populate a caller's selection lists; no mutation occurs.
#[derive(Debug, Clone)]
pub struct XmlSummary {
    pub raw: String,
    pub tags: Vec<String>,
}

/// Parse a document and list its tag names.
pub fn parse_summary<P: AsRef<Path>>(path: P) -> XmlEditResult<XmlSummary> {
    let path = path.as_ref();
    let lock = pathlock::lock_for(path);
    let _guard = pathlock::acquire(&lock);

    let (raw, doc) = load(path)?;
    let mut tags = Vec::new();
    collect_tags(&doc.root, &mut tags);
    Ok(XmlSummary { raw, tags })
}

fn collect_tags(element: &super::XmlElement, tags: &mut Vec<String>) {
    if !tags.iter().any(|t| t == &element.tag) {
        tags.push(element.tag.clone());
    }
    for child in &element.children {
        collect_tags(child, tags);
    }
}

/// Set `attr` to `value` on every direct child of the root whose tag equals
/// `tag`, then persist the tree back to `path`.
///
/// When `attr` is `"id"` the supplied value is ignored and matching elements
/// are numbered sequentially from 1 in document order. Every call restarts
/// the numbering at 1. Returns the number of elements touched; zero matches
/// still rewrite the unchanged tree.
pub fn add_attribute<P: AsRef<Path>>(
    path: P,
    tag: &str,
    attr: &str,
    value: &str,
) -> XmlEditResult<usize> {
    let path = path.as_ref();
    let lock = pathlock::lock_for(path);
    let _guard = pathlock::acquire(&lock);

    let (_, mut doc) = load(path)?;
    let mut matched = 0;

    if attr == "id" {
        let mut next_id: u64 = 1;
        for child in doc.root.children.iter_mut().filter(|c| c.tag == tag) {
            child.attributes.insert("id".to_string(), next_id.to_string());
            next_id += 1;
            matched += 1;
        }
    } else {
        for child in doc.root.children.iter_mut().filter(|c| c.tag == tag) {
            child
                .attributes
                .insert(attr.to_string(), value.to_string());
            matched += 1;
        }
    }

    persist(path, &doc)?;
    Ok(matched)
}

/// Remove `attr` from every direct child of the root whose tag equals
/// `tag`, then persist the tree back to `path`.
///
/// Absence of the attribute on a matching element is benign. Returns the
/// number of attributes actually removed; zero still rewrites the tree.
pub fn delete_attribute<P: AsRef<Path>>(path: P, tag: &str, attr: &str) -> XmlEditResult<usize> {
    let path = path.as_ref();
    let lock = pathlock::lock_for(path);
    let _guard = pathlock::acquire(&lock);

    let (_, mut doc) = load(path)?;
    let mut removed = 0;

    for child in doc.root.children.iter_mut().filter(|c| c.tag == tag) {
        if child.attributes.shift_remove(attr).is_some() {
            removed += 1;
        }
    }

    persist(path, &doc)?;
    Ok(removed)
}

fn load(path: &Path) -> XmlEditResult<(String, XmlDocument)> {
    if !path.exists() {
        return Err(XmlEditError::FileNotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|source| XmlEditError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = XmlDocument::parse_str(&raw).map_err(|e| XmlEditError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok((raw, doc))
}

fn persist(path: &Path, doc: &XmlDocument) -> XmlEditResult<()> {
    let xml = doc.to_xml_string().map_err(|e| XmlEditError::Serialize {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(path, xml).map_err(|source| XmlEditError::Write {
        path: path.to_path_buf(),
        source,
    })
}
