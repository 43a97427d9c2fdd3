use crate::api::ReservationService;
use crate::controller::{spawn_controller, ControllerHandle, ControllerOptions, ReservationSnapshot, ToggleControl};
use crate::enums::ListingField;
use crate::error::Error;
use crate::listing::{AttributeChange, ListingAttributes};
use crate::render::{render_all, render_one, ListingView};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;

/// A mounted gift listing: the rendered attributes plus the reservation toggle kept in sync with
/// the gift service.
#[derive(Debug)]
pub struct GiftItem {
    attributes: ListingAttributes,
    view: ListingView,
    controller: ControllerHandle,
}

impl GiftItem {
    /// Renders `attributes` and starts reading the reservation status. Must be called from within
    /// a tokio runtime.
    pub fn mount<S, C>(
        attributes: ListingAttributes,
        service: Arc<S>,
        control: C,
        options: ControllerOptions,
    ) -> Self
    where
        S: ReservationService + 'static,
        C: ToggleControl + 'static,
    {
        let view = render_all(&attributes);
        let controller = spawn_controller(attributes.id.clone(), service, control, options);
        
        log::debug!("Mounted listing {}", attributes.id);
        
        Self {
            attributes,
            view,
            controller,
        }
    }
    
    /// Names of the attributes that are re-rendered when changed.
    pub fn observed_attributes() -> impl Iterator<Item = &'static str> {
        ListingField::observed().map(|field| field.name())
    }
    
    pub fn attributes(&self) -> &ListingAttributes {
        &self.attributes
    }
    
    pub fn view(&self) -> &ListingView {
        &self.view
    }
    
    /// Sets or removes an attribute and updates the view before returning. Attributes that are
    /// not observed are ignored. Returns whether the view changed.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        let Ok(field) = ListingField::from_str(name) else {
            log::debug!("Ignoring unobserved attribute {name}");
            return false;
        };
        let change = self.attributes.set(field, value.map(str::to_owned));
        
        self.attribute_changed(&change)
    }
    
    /// Applies a change already made to the attributes.
    fn attribute_changed(&mut self, change: &AttributeChange) -> bool {
        render_one(&mut self.view, &self.attributes, change)
    }
    
    /// Delivers a click on the toggle control.
    pub fn click(&self) -> Result<(), Error> {
        self.controller.click()
    }
    
    /// Reads the status again after the initial read failed.
    pub fn retry(&self) -> Result<(), Error> {
        self.controller.retry()
    }
    
    /// The current reservation state.
    pub fn reservation(&self) -> ReservationSnapshot {
        self.controller.snapshot()
    }
    
    /// Receives every change to the reservation state.
    pub fn subscribe(&self) -> watch::Receiver<ReservationSnapshot> {
        self.controller.subscribe()
    }
    
    /// Cancels polling and stops the controller. Returns the error the controller stopped with,
    /// if any.
    pub async fn teardown(self) -> Result<(), Error> {
        log::debug!("Tearing down listing {}", self.attributes.id);
        self.controller.teardown().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockReservationService;
    use crate::controller::ControlState;
    use crate::enums::ReservationStatus;
    
    fn service(status: ReservationStatus) -> Arc<MockReservationService> {
        let mut service = MockReservationService::new();
        
        service.expect_status()
            .returning(move |_| Ok(status));
        service.expect_toggle()
            .returning(|_| Ok(ReservationStatus::Bought));
        
        Arc::new(service)
    }
    
    fn attributes() -> ListingAttributes {
        ListingAttributes::new("42")
            .with(ListingField::Title, "Kettle")
            .with(ListingField::Description, "Stainless steel")
            .with(ListingField::Price, "1200")
    }
    
    fn mount(attributes: ListingAttributes) -> GiftItem {
        GiftItem::mount(
            attributes,
            service(ReservationStatus::Unbought),
            ControlState::default(),
            ControllerOptions::default(),
        )
    }
    
    #[test]
    fn observes_listing_attributes() {
        assert_eq!(GiftItem::observed_attributes().count(), 8);
        assert!(GiftItem::observed_attributes().any(|name| name == "originalPrice"));
        assert!(!GiftItem::observed_attributes().any(|name| name == "id"));
    }
    
    #[tokio::test(start_paused = true)]
    async fn mounts_with_price_in_description() {
        let item = mount(attributes());
        
        assert_eq!(item.view().description, "Stainless steel - $1,200");
        assert_eq!(item.view().discount, None);
        
        item.teardown().await.unwrap();
    }
    
    #[tokio::test(start_paused = true)]
    async fn mounts_with_discount() {
        let item = mount(attributes().with(ListingField::OriginalPrice, "1500"));
        
        assert_eq!(item.view().description, "Stainless steel - $1,200");
        assert_eq!(item.view().discount_html().unwrap(), r#"<span class="original-price">$1,500</span><span class="current-price">$1,200</span>"#);
        
        item.teardown().await.unwrap();
    }
    
    #[tokio::test(start_paused = true)]
    async fn attribute_changes_render_synchronously() {
        let mut item = mount(attributes());
        
        assert!(item.set_attribute("originalPrice", Some("1500")));
        assert!(item.view().discount.is_some());
        
        assert!(item.set_attribute("title", Some("Copper kettle")));
        assert_eq!(item.view().title, "Copper kettle");
        
        assert!(item.set_attribute("price", None));
        assert_eq!(item.view().description, "Stainless steel");
        assert_eq!(item.view().discount, None);
        
        item.teardown().await.unwrap();
    }
    
    #[tokio::test(start_paused = true)]
    async fn redundant_and_unobserved_writes_are_ignored() {
        let mut item = mount(attributes());
        let before = item.view().clone();
        
        assert!(!item.set_attribute("title", Some("Kettle")));
        assert!(!item.set_attribute("id", Some("43")));
        assert!(!item.set_attribute("originalprice", Some("1500")));
        assert_eq!(item.view(), &before);
        assert_eq!(item.attributes().id, "42");
        
        item.teardown().await.unwrap();
    }
    
    #[tokio::test(start_paused = true)]
    async fn click_reserves_listing() {
        let item = mount(attributes());
        let mut reservation = item.subscribe();
        
        reservation.wait_for(|snapshot| snapshot.is_idle()).await.unwrap();
        item.click().unwrap();
        reservation.wait_for(|snapshot| snapshot.checked).await.unwrap();
        
        let snapshot = item.reservation();
        
        assert_eq!(snapshot.status(), Some(ReservationStatus::Bought));
        assert!(!snapshot.disabled);
        
        item.teardown().await.unwrap();
    }
}
