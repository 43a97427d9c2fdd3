//! Projects [`ListingAttributes`] into the fields the widget displays.

use crate::enums::ListingField;
use crate::listing::{AttributeChange, ListingAttributes};
use crate::price::{format_prices, DiscountBlock};
use serde::Serialize;

/// Everything visible about a listing, apart from the reservation toggle.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ListingView {
    /// Target of the link wrapping the picture.
    pub picture_href: String,
    pub image_src: String,
    pub image_alt: String,
    pub title: String,
    /// The description followed by the current price, if any.
    pub description: String,
    /// Shown only when the listing is discounted.
    pub discount: Option<DiscountBlock>,
    pub link_text: String,
    pub link_href: String,
}

impl ListingView {
    /// Markup for the discount block, if shown.
    pub fn discount_html(&self) -> Option<String> {
        self.discount.as_ref().map(DiscountBlock::to_html)
    }
}

/// Renders every field. Used once when the widget is mounted.
pub fn render_all(attributes: &ListingAttributes) -> ListingView {
    let mut view = ListingView::default();
    
    for field in ListingField::observed() {
        set_field(&mut view, field, attributes.get(field));
    }
    
    render_prices(&mut view, attributes);
    view
}

/// Applies a single attribute change. `attributes` must already hold the new value.
///
/// Changes to the title, description or either price re-run the whole price pass so the
/// description text and the discount block can never disagree. Returns whether the view changed;
/// a change whose old and new values are equal never touches the view.
pub fn render_one(
    view: &mut ListingView,
    attributes: &ListingAttributes,
    change: &AttributeChange,
) -> bool {
    if change.is_redundant() {
        return false;
    }
    
    let mut changed = set_field(view, change.field, change.new_value.as_deref());
    
    if change.field.affects_price() {
        changed |= render_prices(view, attributes);
    }
    
    changed
}

/// Sets the visual field directly bound to `field`. The description and prices are handled by
/// [`render_prices`].
fn set_field(
    view: &mut ListingView,
    field: ListingField,
    value: Option<&str>,
) -> bool {
    let value = value.unwrap_or_default();
    
    match field {
        ListingField::Title => replace(&mut view.title, value),
        ListingField::Image => replace(&mut view.image_src, value),
        ListingField::Alt => replace(&mut view.image_alt, value),
        ListingField::Link => {
            // both the picture and the text link point at the listing
            let picture = replace(&mut view.picture_href, value);
            
            replace(&mut view.link_href, value) | picture
        },
        ListingField::LinkText => replace(&mut view.link_text, value),
        ListingField::Description |
        ListingField::Price |
        ListingField::OriginalPrice => false,
    }
}

fn render_prices(
    view: &mut ListingView,
    attributes: &ListingAttributes,
) -> bool {
    let display = format_prices(
        attributes.get(ListingField::Price),
        attributes.get(ListingField::OriginalPrice),
    );
    let description = display.describe(attributes.get(ListingField::Description).unwrap_or_default());
    let changed = view.discount != display.discount;
    
    view.discount = display.discount;
    
    replace(&mut view.description, &description) | changed
}

fn replace(target: &mut String, value: &str) -> bool {
    if target == value {
        return false;
    }
    
    value.clone_into(target);
    true
}
