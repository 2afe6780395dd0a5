//! PASCAL-VOC annotation document
//!
//! Object records are `object` elements at any depth below the root, each with a
//! `name` child holding the label. Everything else in the tree is carried through
//! untouched.

use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::Path;
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{NormalizeError, Result};
use crate::rules::{LabelAction, RuleTable};
use crate::types::DocumentReport;

pub const OBJECT_TAG: &str = "object";
pub const LABEL_TAG: &str = "name";

/// A parsed annotation file.
#[derive(Debug, Clone)]
pub struct AnnotationDocument {
    root: Element,
}

impl AnnotationDocument {
    pub fn parse<R: Read>(reader: R, path: &Path) -> Result<Self> {
        let root = Element::parse(reader).map_err(|source| NormalizeError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|e| NormalizeError::io(path, e))?;
        Self::parse(std::io::BufReader::new(file), path)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Labels of every object record in document order. Records without a
    /// label yield `None`.
    pub fn labels(&self) -> Vec<Option<String>> {
        let mut labels = Vec::new();
        collect_labels(&self.root, &mut labels);
        labels
    }

    /// Apply `rules` to every object record, removing and relabeling in place.
    pub fn apply_rules(&mut self, rules: &RuleTable) -> DocumentReport {
        let mut report = DocumentReport::default();
        normalize_children(&mut self.root, rules, &mut report);
        report
    }

    /// Serialize the whole document into memory.
    pub fn to_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let config = EmitterConfig::new().perform_indent(true);
        self.root
            .write_with_config(&mut buffer, config)
            .map_err(|e| NormalizeError::Serialize {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(buffer)
    }

    /// Serialize, then overwrite `path` with the result.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes(path)?;
        fs::write(path, bytes).map_err(|e| NormalizeError::io(path, e))
    }
}

fn label_of(object: &Element) -> Option<Cow<'_, str>> {
    object
        .get_child(LABEL_TAG)
        .and_then(|name| name.get_text())
        .filter(|text| !text.is_empty())
}

fn set_label(object: &mut Element, label: String) {
    if let Some(name) = object.get_mut_child(LABEL_TAG) {
        name.children = vec![XMLNode::Text(label)];
    }
}

fn collect_labels(element: &Element, labels: &mut Vec<Option<String>>) {
    for child in element.children.iter().filter_map(XMLNode::as_element) {
        if child.name == OBJECT_TAG {
            labels.push(label_of(child).map(Cow::into_owned));
        }
        collect_labels(child, labels);
    }
}

// Each child list is filtered in one pass, so dropping a record never skips
// the sibling after it.
fn normalize_children(element: &mut Element, rules: &RuleTable, report: &mut DocumentReport) {
    element.children.retain_mut(|node| {
        let child = match node {
            XMLNode::Element(child) => child,
            _ => return true,
        };

        if child.name == OBJECT_TAG {
            let action = label_of(child).map(|label| rules.apply(&label));
            let action = match action {
                Some(action) => action,
                None => {
                    report.unlabeled += 1;
                    normalize_children(child, rules, report);
                    return true;
                }
            };
            match action {
                LabelAction::Remove => {
                    report.removed += 1;
                    return false;
                }
                LabelAction::Rename(label) => {
                    report.relabeled += 1;
                    set_label(child, label);
                }
                LabelAction::Keep => report.unchanged += 1,
            }
        }

        normalize_children(child, rules, report);
        true
    });
}
