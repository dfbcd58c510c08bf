use mealcart_dom::{DomNode, Snapshot};

use crate::view::{CardView, CartLineView, CartView, CategoryView, MenuView, StoreView};
use crate::Action;

// Surface keys. Each surface is the root of an independently repaintable
// subtree; a shell may mount any subset of them.
pub const CATEGORY_BAR: &str = "category-bar";
pub const TABLE_NUMBER: &str = "table-number";
pub const MENU_GRID: &str = "menu-grid";
pub const CART_LIST: &str = "cart-list";
pub const CART_SUMMARY: &str = "cart-summary";
pub const CART_COUNT: &str = "cart-count";
pub const MOBILE_CART: &str = "mobile-cart";

pub const SURFACES: &[&str] = &[
    CATEGORY_BAR,
    TABLE_NUMBER,
    MENU_GRID,
    CART_LIST,
    CART_SUMMARY,
    CART_COUNT,
    MOBILE_CART,
];

pub const CART_SURFACES: &[&str] = &[CART_LIST, CART_SUMMARY, CART_COUNT, MOBILE_CART];

/// Render the full page tree: layout chrome plus every surface.
pub fn render_snapshot(view: &StoreView) -> Snapshot {
    let header = DomNode::el("header").with_class("topbar").with_children(vec![
        DomNode::text("h1", "Mealcart").with_class("brand"),
        DomNode::el("div").with_class("table-control").with_children(vec![
            DomNode::text("span", "Table").with_class("table-label"),
            DomNode::text("button", "-")
                .with_class("qty-btn")
                .on("click", Action::ChangeTable(-1).name()),
            table_number(view.table),
            DomNode::text("button", "+")
                .with_class("qty-btn")
                .on("click", Action::ChangeTable(1).name()),
        ]),
        DomNode::el("input")
            .with_key("search-input")
            .with_attr("type", "search")
            .with_attr("class", "search-input")
            .with_attr("placeholder", "Search food...")
            .with_attr("autocomplete", "off")
            .on("input", Action::Search(String::new()).name()),
        DomNode::el("button")
            .with_class("cart-toggle")
            .on("click", Action::ToggleCart.name())
            .with_children(vec![DomNode::text("span", "Cart"), cart_count(&view.cart)]),
    ]);

    let sidebar = DomNode::el("aside").with_class("sidebar").with_children(vec![
        DomNode::text("h3", "Current Order"),
        cart_list(&view.cart),
        cart_summary(&view.cart),
    ]);

    let root = DomNode::el("div")
        .with_key("app")
        .with_class("app")
        .with_children(vec![
            header,
            category_bar(&view.categories),
            DomNode::el("main").with_class("content").with_children(vec![menu_grid(&view.menu)]),
            sidebar,
            mobile_cart(&view.cart, view.cart_open),
        ]);

    Snapshot { root }
}

/// Every surface, in [`SURFACES`] order.
pub fn surfaces(view: &StoreView) -> Vec<DomNode> {
    let mut out = vec![
        category_bar(&view.categories),
        table_number(view.table),
        menu_grid(&view.menu),
    ];
    out.extend(cart_surfaces(&view.cart, view.cart_open));
    out
}

/// Every cart surface, all built from the same [`CartView`].
pub fn cart_surfaces(cart: &CartView, open: bool) -> Vec<DomNode> {
    vec![
        cart_list(cart),
        cart_summary(cart),
        cart_count(cart),
        mobile_cart(cart, open),
    ]
}

pub fn category_bar(categories: &[CategoryView]) -> DomNode {
    DomNode::el("nav")
        .with_key(CATEGORY_BAR)
        .with_class("category-bar")
        .with_children(
            categories
                .iter()
                .map(|c| {
                    let class = if c.active { "cat-btn active" } else { "cat-btn" };
                    DomNode::text("button", &c.name)
                        .with_class(class)
                        .with_attr("data-cat", c.name.as_str())
                        .on("click", c.action.as_str())
                })
                .collect(),
        )
}

pub fn table_number(table: u32) -> DomNode {
    DomNode::text("span", &table.to_string())
        .with_key(TABLE_NUMBER)
        .with_class("table-number")
}

pub fn menu_grid(menu: &MenuView) -> DomNode {
    let grid = DomNode::el("div").with_key(MENU_GRID).with_class("menu-grid");
    let placeholder =
        |class: &str, message: &str| vec![DomNode::text("div", message).with_class(class)];
    match menu {
        MenuView::Idle { message } => grid.with_children(placeholder("empty-state", *message)),
        MenuView::Loading { message } => grid.with_children(placeholder("loading", *message)),
        MenuView::Empty { message } => grid.with_children(placeholder("empty-state", *message)),
        MenuView::Failed { message } => grid.with_children(placeholder("error", *message)),
        MenuView::Grid { cards } => grid.with_children(cards.iter().map(food_card).collect()),
    }
}

fn food_card(card: &CardView) -> DomNode {
    DomNode::el("div")
        .with_key(format!("card-{}", card.id))
        .with_class("food-card")
        .with_children(vec![
            DomNode::el("div").with_class("img-wrapper").with_children(vec![
                DomNode::el("img")
                    .with_attr("src", card.image.as_str())
                    .with_attr("alt", card.name.as_str())
                    .with_attr("loading", "lazy"),
                DomNode::text("div", &card.stock).with_class("badge"),
            ]),
            DomNode::el("div").with_class("food-info").with_children(vec![
                DomNode::text("h4", &card.name),
                DomNode::el("div").with_class("price-row").with_children(vec![
                    DomNode::text("span", &card.price).with_class("price"),
                    DomNode::text("button", "+")
                        .with_class("add-btn")
                        .on("click", card.add_action.as_str()),
                ]),
            ]),
        ])
}

/// The line list (or empty message), without a surface key.
fn cart_items(cart: &CartView) -> DomNode {
    let list = DomNode::el("div").with_class("cart-items");
    match cart.empty_message {
        Some(message) => {
            list.with_children(vec![DomNode::text("div", message).with_class("empty-state")])
        }
        None => list.with_children(cart.lines.iter().map(cart_line).collect()),
    }
}

fn cart_line(line: &CartLineView) -> DomNode {
    DomNode::el("div").with_class("cart-item").with_children(vec![
        DomNode::el("img")
            .with_attr("src", line.image.as_str())
            .with_attr("alt", ""),
        DomNode::el("div").with_class("cart-details").with_children(vec![
            DomNode::text("h5", &line.name),
            DomNode::el("div").with_class("qty-controls").with_children(vec![
                DomNode::text("span", &line.line_total).with_class("price"),
                DomNode::text("button", "-")
                    .with_class("qty-btn")
                    .on("click", line.decrement_action.as_str()),
                DomNode::text("span", &line.qty.to_string()).with_class("qty"),
                DomNode::text("button", "+")
                    .with_class("qty-btn")
                    .on("click", line.increment_action.as_str()),
            ]),
        ]),
    ])
}

fn summary_rows(cart: &CartView) -> Vec<DomNode> {
    let row = |label: &str, value: &str, key: &str| {
        DomNode::el("div").with_class("row").with_children(vec![
            DomNode::text("span", label),
            DomNode::text("span", value).with_class(key),
        ])
    };
    vec![
        row("Subtotal", cart.subtotal.as_str(), "subtotal"),
        row("Tax (6%)", cart.tax.as_str(), "tax"),
        DomNode::el("div").with_class("row total").with_children(vec![
            DomNode::text("span", "Total"),
            DomNode::text("strong", &cart.total).with_class("total"),
        ]),
        DomNode::text("button", "Checkout Now").with_class("checkout-btn"),
    ]
}

pub fn cart_list(cart: &CartView) -> DomNode {
    cart_items(cart).with_key(CART_LIST)
}

pub fn cart_summary(cart: &CartView) -> DomNode {
    DomNode::el("div")
        .with_key(CART_SUMMARY)
        .with_class("payment-summary")
        .with_children(summary_rows(cart))
}

pub fn cart_count(cart: &CartView) -> DomNode {
    DomNode::text("span", &cart.badge.to_string())
        .with_key(CART_COUNT)
        .with_class("cart-count")
}

pub fn mobile_cart(cart: &CartView, open: bool) -> DomNode {
    let title = DomNode::text("h3", "Payment Summary").with_class("mobile-summary-title");
    let mut summary = vec![title];
    summary.extend(summary_rows(cart));

    DomNode::el("div")
        .with_key(MOBILE_CART)
        .with_class(if open { "mobile-cart open" } else { "mobile-cart hidden" })
        .with_children(vec![
            DomNode::el("div").with_class("mobile-cart-header").with_children(vec![
                DomNode::text("h3", "Your Order"),
                DomNode::text("button", "Close")
                    .with_class("close-btn")
                    .on("click", Action::ToggleCart.name()),
            ]),
            DomNode::el("div").with_class("mobile-cart-body").with_children(vec![
                cart_items(cart),
                DomNode::el("div").with_class("payment-summary").with_children(summary),
            ]),
        ])
}
