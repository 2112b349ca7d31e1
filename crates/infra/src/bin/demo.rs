use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use storefront_core::{ProductId, RequestContext, UserId};
use storefront_infra::{DemoConfig, InMemoryCatalog};
use storefront_products::Product;
use storefront_purchasing::{PurchaseDto, PurchaseUsecase};

fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = DemoConfig::from_env().context("loading demo config")?;
    tracing::info!(?config, "starting demo purchase");

    let catalog = Arc::new(InMemoryCatalog::new());
    let owner = UserId::new();
    let product = Product::new(ProductId::new(), "colorful socks", owner, config.price)
        .with_published_at(Some(Utc::now() - chrono::Duration::seconds(1)));
    let product_id = product.id_typed();

    catalog
        .insert_product(product)
        .context("seeding product")?;
    catalog
        .add_discount(product_id, "5$ off if you buy 2", -5, 2)
        .context("seeding discount")?;

    let timeout = chrono::Duration::from_std(config.request_timeout)
        .context("request timeout out of range")?;
    let deadline = Utc::now()
        .checked_add_signed(timeout)
        .context("request deadline out of range")?;
    let ctx = RequestContext::background().with_deadline(deadline);

    let usecase = PurchaseUsecase::new(catalog.clone());
    let purchase = usecase
        .purchase(
            &ctx,
            PurchaseDto {
                product_id,
                user_id: UserId::new(),
                unit: config.units,
            },
        )
        .map_err(|e| {
            let code = e.code();
            anyhow::Error::new(e).context(format!("purchase failed: {code}"))
        })?;

    println!("{}", serde_json::to_string_pretty(&purchase)?);
    Ok(())
}
