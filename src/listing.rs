use crate::enums::ListingField;
use crate::types::ListingId;
use serde::{Serialize, Deserialize};

/// The descriptive data for one listing, as supplied by the embedding page. Any field may be
/// missing.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListingAttributes {
    /// Used for requests to the gift service. Not rendered and not observed for changes.
    #[serde(default)]
    pub id: ListingId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// The current price.
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub original_price: Option<String>,
    /// Source of the image.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, rename = "linktext")]
    pub link_text: Option<String>,
}

impl ListingAttributes {
    /// Creates attributes for the listing with the given id.
    pub fn new<T>(id: T) -> Self
    where
        T: Into<ListingId>,
    {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
    
    fn slot(&self, field: ListingField) -> &Option<String> {
        match field {
            ListingField::Title => &self.title,
            ListingField::Description => &self.description,
            ListingField::Price => &self.price,
            ListingField::OriginalPrice => &self.original_price,
            ListingField::Image => &self.image,
            ListingField::Alt => &self.alt,
            ListingField::Link => &self.link,
            ListingField::LinkText => &self.link_text,
        }
    }
    
    fn slot_mut(&mut self, field: ListingField) -> &mut Option<String> {
        match field {
            ListingField::Title => &mut self.title,
            ListingField::Description => &mut self.description,
            ListingField::Price => &mut self.price,
            ListingField::OriginalPrice => &mut self.original_price,
            ListingField::Image => &mut self.image,
            ListingField::Alt => &mut self.alt,
            ListingField::Link => &mut self.link,
            ListingField::LinkText => &mut self.link_text,
        }
    }
    
    /// Gets the value of a field.
    pub fn get(&self, field: ListingField) -> Option<&str> {
        self.slot(field).as_deref()
    }
    
    /// Sets a field, returning the change that was made.
    pub fn set(&mut self, field: ListingField, value: Option<String>) -> AttributeChange {
        let old_value = std::mem::replace(self.slot_mut(field), value.clone());
        
        AttributeChange {
            field,
            old_value,
            new_value: value,
        }
    }
    
    /// Builder-style setter.
    pub fn with(mut self, field: ListingField, value: &str) -> Self {
        *self.slot_mut(field) = Some(value.to_owned());
        self
    }
}

/// A single attribute mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub field: ListingField,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl AttributeChange {
    /// The value was written but did not change.
    pub fn is_redundant(&self) -> bool {
        self.old_value == self.new_value
    }
}
