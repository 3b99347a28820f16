//! Xdmf document loading and `DataItem` traversal

use std::path::{Path, PathBuf};

use roxmltree::{Document, Node, ParsingOptions};

use crate::data_item::DataItemElement;
use crate::error::{CheckError, Result};

pub const ROOT_TAG: &str = "Xdmf";
pub const DATA_ITEM_TAG: &str = "DataItem";

/// Read the document text, rejecting anything that is not a regular file
pub fn read_document(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(CheckError::NotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// A parsed Xdmf document whose root element has been verified
pub struct XdmfDocument<'input> {
    path: PathBuf,
    doc: Document<'input>,
}

impl<'input> XdmfDocument<'input> {
    /// Parse `text` (read from `path`) and check the root tag
    pub fn parse(path: &Path, text: &'input str) -> Result<Self> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(text, options).map_err(|e| {
            CheckError::MalformedDocument {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;

        let root = doc.root_element();
        if root.tag_name().name() != ROOT_TAG || root.tag_name().namespace().is_some() {
            return Err(CheckError::WrongRoot {
                path: path.to_path_buf(),
                found: root.tag_name().name().to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every `DataItem` below the root, depth-first in document order
    pub fn data_items(&self) -> impl Iterator<Item = DataItemElement<'_>> + '_ {
        self.doc
            .root_element()
            .descendants()
            .filter(|node| {
                node.is_element()
                    && node.tag_name().name() == DATA_ITEM_TAG
                    && node.tag_name().namespace().is_none()
            })
            .map(|node| self.data_item(node))
    }

    fn data_item<'a>(&'a self, node: Node<'a, 'input>) -> DataItemElement<'a> {
        DataItemElement {
            line: self.doc.text_pos_at(node.range().start).row,
            number_type: node.attribute("NumberType"),
            precision: node.attribute("Precision"),
            format: node.attribute("Format"),
            dimensions: node.attribute("Dimensions"),
            text: node.text().unwrap_or(""),
        }
    }
}
