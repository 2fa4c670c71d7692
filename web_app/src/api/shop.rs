//! # Shop API Module
//!
//! Product catalog, the cart kept in the tutor session and the checkout.
//!
//! The cart only stores product ids and quantities. Prices and stock are
//! read again from the catalog every time the cart is shown or bought.

use super::{ApiError, ApiResult};
use crate::{front, metric, models, repo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MSG_INVALID_QUANTITY: &str = "A quantidade deve ser um número inteiro maior que zero.";
pub const MSG_EMPTY_CART: &str = "Seu carrinho está vazio.";
pub const MSG_PRODUCT_UNAVAILABLE: &str = "Um dos produtos do carrinho não está mais disponível.";
pub const MSG_ITEM_REMOVED: &str = "Produto removido do carrinho.";
pub const MSG_PURCHASE_DONE: &str = "Compra realizada com sucesso!";

pub fn msg_added_to_cart(name: &str) -> String {
    format!("{name} adicionado ao carrinho!")
}

pub fn msg_insufficient_stock(name: &str) -> String {
    format!("Estoque insuficiente para {name}.")
}

fn format_money(value: Decimal) -> String {
    format!("{value:.2}")
}

/// Products chosen by a tutor, product id to quantity
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: BTreeMap<i64, u32>,
}

impl Cart {
    pub fn quantity_of(&self, product_id: i64) -> u32 {
        self.lines.get(&product_id).copied().unwrap_or_default()
    }

    /// Adds `quantity` units of a product.
    ///
    /// The cart is left unchanged when the units already in the cart plus
    /// `quantity` would go over the product stock.
    pub fn add(&mut self, product: &models::product::Product, quantity: u32) -> ApiResult<()> {
        if quantity == 0 {
            return Err(ApiError::Validation(MSG_INVALID_QUANTITY.into()));
        }

        let wanted = self.quantity_of(product.id).saturating_add(quantity);
        if wanted > product.stock {
            return Err(ApiError::Conflict(msg_insufficient_stock(&product.name)));
        }

        self.lines.insert(product.id, wanted);
        Ok(())
    }

    /// Drops the whole line of a product, returns if it was in the cart.
    pub fn remove(&mut self, product_id: i64) -> bool {
        self.lines.remove(&product_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn item_count(&self) -> u32 {
        self.lines.values().sum()
    }

    pub fn lines(&self) -> Vec<(i64, u32)> {
        self.lines.iter().map(|(id, qty)| (*id, *qty)).collect()
    }

    fn product_ids(&self) -> Vec<i64> {
        self.lines.keys().copied().collect()
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ProductSchema {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub price: String,
    pub stock: u32,
    pub image_url: Option<String>,
}

impl From<models::product::Product> for ProductSchema {
    fn from(product: models::product::Product) -> Self {
        Self {
            price: format_money(product.price),
            id: product.id,
            name: product.name,
            emoji: product.emoji,
            description: product.description,
            stock: product.stock,
            image_url: product.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartLineSchema {
    pub product: ProductSchema,
    pub quantity: u32,
    pub subtotal: String,
}

#[derive(Debug, Serialize)]
pub struct CartSummarySchema {
    pub lines: Vec<CartLineSchema>,
    pub total: String,
    pub item_count: u32,
}

impl CartSummarySchema {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Products that still have stock.
pub async fn get_catalog(repo: &repo::ImplAppRepo) -> ApiResult<Vec<ProductSchema>> {
    Ok(repo
        .get_available_products()
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Parses the quantity of the add to cart form, a blank value means one unit
fn parse_quantity(value: &str) -> ApiResult<u32> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(1);
    }

    value
        .parse::<u32>()
        .ok()
        .filter(|qty| *qty > 0)
        .ok_or_else(|| ApiError::Validation(MSG_INVALID_QUANTITY.into()))
}

/// Adds a product to the cart, checking the current stock of the product.
pub async fn add_to_cart(
    cart: &mut Cart,
    product_id: i64,
    form: &front::forms::shop::AddToCartForm,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::product::Product> {
    let quantity = parse_quantity(&form.quantity)?;
    let product = repo
        .get_product_by_id(product_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    cart.add(&product, quantity)?;

    Ok(product)
}

/// Lines of the cart priced with the current catalog.
///
/// Products that left the catalog are skipped.
pub async fn get_cart_summary(
    cart: &Cart,
    repo: &repo::ImplAppRepo,
) -> ApiResult<CartSummarySchema> {
    if cart.is_empty() {
        return Ok(CartSummarySchema {
            lines: vec![],
            total: format_money(Decimal::ZERO),
            item_count: 0,
        });
    }

    let products = repo.get_products_by_ids(&cart.product_ids()).await?;

    let mut total = Decimal::ZERO;
    let mut item_count = 0;
    let mut lines = Vec::with_capacity(products.len());

    for product in products {
        let quantity = cart.quantity_of(product.id);
        if quantity == 0 {
            continue;
        }

        let subtotal = product.price * Decimal::from(quantity);
        total += subtotal;
        item_count += quantity;

        lines.push(CartLineSchema {
            product: product.into(),
            quantity,
            subtotal: format_money(subtotal),
        });
    }

    Ok(CartSummarySchema {
        lines,
        total: format_money(total),
        item_count,
    })
}

/// Buys every line of the cart or none of them.
///
/// The stock is checked again against the catalog and then decremented in
/// a single transaction. The cart is only cleared when the purchase is
/// committed.
pub async fn checkout(cart: &mut Cart, repo: &repo::ImplAppRepo) -> ApiResult<()> {
    let _span = logfire::span!("checkout").entered();

    if cart.is_empty() {
        return Err(ApiError::Conflict(MSG_EMPTY_CART.into()));
    }

    let products = repo
        .get_products_by_ids(&cart.product_ids())
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect::<BTreeMap<_, _>>();

    for (product_id, quantity) in cart.lines() {
        let product = products
            .get(&product_id)
            .ok_or_else(|| ApiError::Conflict(MSG_PRODUCT_UNAVAILABLE.into()))?;

        if product.stock < quantity {
            return Err(ApiError::Conflict(msg_insufficient_stock(&product.name)));
        }
    }

    match repo.decrement_stock(&cart.lines()).await? {
        models::product::StockCommit::Committed => {
            log::info!("checkout committed with {} items", cart.item_count());
            cart.clear();
            metric::incr_checkout_statds("committed");
            Ok(())
        }
        models::product::StockCommit::InsufficientStock(product_id) => {
            log::warn!("stock of product {product_id} changed while checking out");
            metric::incr_checkout_statds("insufficient_stock");
            Err(ApiError::Conflict(
                products
                    .get(&product_id)
                    .map(|product| msg_insufficient_stock(&product.name))
                    .unwrap_or_else(|| MSG_PRODUCT_UNAVAILABLE.into()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use mockall::predicate::*;
    use rust_decimal_macros::dec;

    fn product(id: i64, price: Decimal, stock: u32) -> models::product::Product {
        models::product::Product {
            id,
            name: format!("Produto {id}"),
            emoji: "🐶".into(),
            description: "".into(),
            price,
            stock,
            image_url: None,
        }
    }

    fn add_form(quantity: &str) -> front::forms::shop::AddToCartForm {
        front::forms::shop::AddToCartForm {
            quantity: quantity.into(),
        }
    }

    #[test]
    fn test_cart_add_respects_stock() {
        let ration = product(1, dec!(150.00), 3);
        let mut cart = Cart::default();

        cart.add(&ration, 2).unwrap();
        let over = cart.add(&ration, 2);

        assert!(matches!(over, Err(ApiError::Conflict(msg)) if msg == msg_insufficient_stock("Produto 1")));
        assert_eq!(cart.quantity_of(1), 2);

        cart.add(&ration, 1).unwrap();
        assert_eq!(cart.quantity_of(1), 3);
        assert!(matches!(cart.add(&ration, 0), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_cart_remove_and_clear() {
        let mut cart = Cart::default();
        cart.add(&product(1, dec!(10), 5), 1).unwrap();
        cart.add(&product(2, dec!(20), 5), 2).unwrap();

        assert!(cart.remove(1));
        assert!(!cart.remove(1));
        assert_eq!(cart.lines(), vec![(2, 2)]);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_survives_session_serialization() {
        let mut cart = Cart::default();
        cart.add(&product(7, dec!(10), 5), 3).unwrap();

        let stored = serde_json::to_string(&cart).unwrap();
        let loaded: Cart = serde_json::from_str(&stored).unwrap();

        assert_eq!(loaded, cart);
    }

    #[test]
    fn test_parse_quantity_defaults_to_one() {
        assert_eq!(parse_quantity("").unwrap(), 1);
        assert_eq!(parse_quantity(" 4 ").unwrap(), 4);
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-1").is_err());
        assert!(parse_quantity("dois").is_err());
    }

    #[ntex::test]
    async fn test_add_to_cart_unknown_product() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_get_product_by_id().returning(|_| Ok(None));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);
        let mut cart = Cart::default();

        let result = add_to_cart(&mut cart, 99, &add_form(""), &mock_repo).await;

        assert!(matches!(result, Err(ApiError::NotFound)));
        assert!(cart.is_empty());
    }

    #[ntex::test]
    async fn test_cart_summary_recomputes_totals() {
        let mut cart = Cart::default();
        cart.add(&product(1, dec!(100), 10), 2).unwrap();
        cart.add(&product(2, dec!(45.50), 10), 1).unwrap();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_products_by_ids()
            .returning(|_| Ok(vec![product(1, dec!(150.00), 10), product(2, dec!(45.50), 10)]));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let summary = get_cart_summary(&cart, &mock_repo).await.unwrap();

        assert_eq!(summary.lines[0].subtotal, "300.00");
        assert_eq!(summary.lines[1].subtotal, "45.50");
        assert_eq!(summary.total, "345.50");
        assert_eq!(summary.item_count, 3);
    }

    #[ntex::test]
    async fn test_checkout_empty_cart() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_decrement_stock().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = checkout(&mut Cart::default(), &mock_repo).await;

        assert!(matches!(result, Err(ApiError::Conflict(msg)) if msg == MSG_EMPTY_CART));
    }

    #[ntex::test]
    async fn test_checkout_commits_and_clears_cart() {
        let mut cart = Cart::default();
        cart.add(&product(1, dec!(25), 10), 2).unwrap();
        cart.add(&product(2, dec!(40), 10), 1).unwrap();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_products_by_ids()
            .returning(|_| Ok(vec![product(1, dec!(25), 10), product(2, dec!(40), 10)]));
        mock_repo
            .expect_decrement_stock()
            .withf(|lines| lines == [(1, 2), (2, 1)])
            .times(1)
            .returning(|_| Ok(models::product::StockCommit::Committed));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        checkout(&mut cart, &mock_repo).await.unwrap();

        assert!(cart.is_empty());
    }

    #[ntex::test]
    async fn test_checkout_with_stock_gone_keeps_cart() {
        let mut cart = Cart::default();
        cart.add(&product(1, dec!(25), 10), 5).unwrap();
        let before = cart.clone();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_products_by_ids()
            .returning(|_| Ok(vec![product(1, dec!(25), 3)]));
        mock_repo.expect_decrement_stock().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = checkout(&mut cart, &mock_repo).await;

        assert!(matches!(result, Err(ApiError::Conflict(msg)) if msg.contains("Produto 1")));
        assert_eq!(cart, before);
    }

    #[ntex::test]
    async fn test_checkout_losing_the_race_keeps_cart() {
        let mut cart = Cart::default();
        cart.add(&product(1, dec!(25), 10), 1).unwrap();
        cart.add(&product(2, dec!(25), 10), 1).unwrap();
        let before = cart.clone();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_products_by_ids()
            .with(eq(vec![1, 2]))
            .returning(|_| Ok(vec![product(1, dec!(25), 10), product(2, dec!(25), 10)]));
        mock_repo
            .expect_decrement_stock()
            .returning(|_| Ok(models::product::StockCommit::InsufficientStock(2)));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = checkout(&mut cart, &mock_repo).await;

        assert!(matches!(result, Err(ApiError::Conflict(msg)) if msg == msg_insufficient_stock("Produto 2")));
        assert_eq!(cart, before);
    }
}
