use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The listing attributes observed for changes after mount. Names match the attribute names
/// set by the embedding page.
#[derive(Display, EnumString, EnumIter, IntoStaticStr, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ListingField {
    #[strum(serialize = "title")]
    Title,
    #[strum(serialize = "description")]
    Description,
    #[strum(serialize = "price")]
    Price,
    #[strum(serialize = "originalPrice")]
    OriginalPrice,
    #[strum(serialize = "image")]
    Image,
    #[strum(serialize = "alt")]
    Alt,
    #[strum(serialize = "link")]
    Link,
    #[strum(serialize = "linktext")]
    LinkText,
}

impl ListingField {
    /// All observed fields in declaration order.
    pub fn observed() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }
    
    /// The attribute name for this field.
    pub fn name(&self) -> &'static str {
        self.into()
    }
    
    /// Fields whose changes affect the description text or the discount block.
    pub fn affects_price(&self) -> bool {
        matches!(self, Self::Title | Self::Description | Self::Price | Self::OriginalPrice)
    }
}
