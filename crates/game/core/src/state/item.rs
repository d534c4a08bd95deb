use std::fmt;

/// Catalog identifier of an item. Valid ids start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A picture card together with the name it must be matched to.
///
/// Items are immutable once fetched from the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    /// Label text. Matching compares it byte-for-byte.
    pub display_name: String,
    /// Location of the picture, opaque to the rules.
    pub image_ref: String,
}

impl Item {
    pub fn new(id: ItemId, display_name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            image_ref: image_ref.into(),
        }
    }
}
