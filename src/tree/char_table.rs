use fxhash::FxBuildHasher;
use lasso::{Rodeo, Spur};

/// Deduplicates the text of leaves. One table is shared by every fragment of a
/// [`Tree`](super::Tree), including clones.
#[derive(Debug)]
pub struct CharTable {
    rodeo: Rodeo<Spur, FxBuildHasher>,
}

impl CharTable {
    pub fn new() -> Self {
        Self {
            rodeo: Rodeo::with_hasher(FxBuildHasher::default()),
        }
    }

    pub(crate) fn intern(&mut self, text: &str) -> Spur {
        self.rodeo.get_or_intern(text)
    }

    pub(crate) fn resolve(&self, key: Spur) -> &str {
        self.rodeo.resolve(&key)
    }

    /// Number of distinct strings in the table.
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.rodeo.contains(text)
    }
}

impl Default for CharTable {
    fn default() -> Self {
        Self::new()
    }
}
