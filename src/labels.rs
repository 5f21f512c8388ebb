//! The user-entered label catalog: an ordered mapping from class index to a
//! human-readable name, edited one entry at a time from the session.

/// Catalog capacity, indices 0-9.
pub const MAX_CLASSES: usize = 10;

#[derive(Debug, thiserror::Error)]
#[error("label catalog is full ({MAX_CLASSES} classes max)")]
pub struct CatalogFull;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelCatalog {
    entries: Vec<String>,
}

impl LabelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label for the next class index.
    pub fn push(&mut self, label: impl Into<String>) -> Result<(), CatalogFull> {
        if self.entries.len() >= MAX_CLASSES {
            return Err(CatalogFull);
        }
        self.entries.push(label.into());
        Ok(())
    }

    /// Drop the highest-index label.
    pub fn pop(&mut self) -> Option<String> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the display label for a class index. A present entry is
    /// returned verbatim, the empty string included; anything else gets the
    /// synthesized `label:<index>` fallback.
    pub fn label_for(&self, class_index: u32) -> String {
        match self.entries.get(class_index as usize) {
            Some(label) => label.clone(),
            None => format!("label:{class_index}"),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for LabelCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut catalog = LabelCatalog::new();
        for label in iter {
            if catalog.push(label).is_err() {
                break;
            }
        }
        catalog
    }
}
