use gift_item::controller::{ControllerOptions, ToggleControl};
use gift_item::{GiftItem, GiftsAPI, ListingAttributes, ListingField};
use std::sync::Arc;
use std::time::Duration;

/// Prints every change made to the control.
struct PrintedControl;

impl ToggleControl for PrintedControl {
    fn set_checked(&mut self, checked: bool) {
        println!("Reserved: {checked}");
    }
    
    fn set_disabled(&mut self, disabled: bool) {
        println!("Disabled: {disabled}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    
    let id = std::env::var("GIFT_ID")?;
    let mut builder = GiftsAPI::builder();
    
    if let Ok(base_url) = std::env::var("GIFTS_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    
    let attributes = ListingAttributes::new(id)
        .with(ListingField::Title, "Kettle")
        .with(ListingField::Description, "Stainless steel")
        .with(ListingField::Price, "1200")
        .with(ListingField::OriginalPrice, "1500");
    let item = GiftItem::mount(
        attributes,
        Arc::new(builder.build()?),
        PrintedControl,
        ControllerOptions::default(),
    );
    
    println!("{}", item.view().title);
    println!("{}", item.view().description);
    
    if let Some(html) = item.view().discount_html() {
        println!("{html}");
    }
    
    let mut reservation = item.subscribe();
    
    reservation.wait_for(|snapshot| snapshot.is_idle() || snapshot.is_failed()).await?;
    
    // reserve, then watch for changes made by other viewers
    item.click()?;
    
    let watch = async {
        while reservation.changed().await.is_ok() {
            let snapshot = reservation.borrow_and_update().clone();
            
            println!("{:?} (last error: {:?})", snapshot.state, snapshot.last_error);
        }
    };
    
    let _ = tokio::time::timeout(Duration::from_secs(60), watch).await;
    
    item.teardown().await?;
    
    Ok(())
}
