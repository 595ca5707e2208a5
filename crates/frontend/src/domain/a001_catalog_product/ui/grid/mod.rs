use contracts::domain::a001_catalog_product::aggregate::CatalogProduct;
use contracts::shared::html_escape::{escape_html, escape_html_opt};
use leptos::prelude::*;

const CARD_CLASS: &str = "group card-reflection block bg-gray-100 dark:bg-gray-800 rounded-xl overflow-hidden p-4 relative transition-transform duration-300 hover:-translate-y-3 hover:shadow-2xl";

/// Call-to-action label on every card
pub const CARD_CTA: &str = "Explore →";

/// Shown in place of the grid when the catalog could not be loaded
pub const LOAD_ERROR_MESSAGE: &str = "Gagal memuat data produk.";

/// Inner markup of a product card (everything inside the `<a>`).
///
/// Text fields and the image URL are escaped; the image URL is an attribute
/// value, so the browser decodes the entities back.
pub fn card_markup(product: &CatalogProduct) -> String {
    let img = escape_html(&product.img);
    let name = escape_html(&product.name);
    let price = escape_html_opt(product.price.as_deref());

    format!(
        r#"<div class="relative"><img src="{img}" alt="{name}" class="rounded-lg object-cover w-full card-img-size" /><img src="{img}" alt="" class="reflection rounded-lg" style="width:60%;" /></div><div class="p-4 text-center"><h4 class="font-semibold text-lg">{name}</h4><p class="text-sm text-gray-600 dark:text-gray-300 mt-1">{price}</p></div><div class="explore-fade"><span class="px-4 py-2 bg-black text-white dark:bg-white dark:text-black rounded-full font-semibold">{cta}</span></div>"#,
        img = img,
        name = name,
        price = price,
        cta = CARD_CTA,
    )
}

/// Markup that replaces the grid after a failed load
pub fn load_error_markup() -> String {
    format!(
        r#"<div class="col-span-4 text-center text-red-500">{}</div>"#,
        escape_html(LOAD_ERROR_MESSAGE)
    )
}

pub fn render_load_error(grid: &web_sys::Element) {
    grid.set_inner_html(&load_error_markup());
}

fn set_hidden(element: &web_sys::Element, hidden_class: &str, hidden: bool) {
    let classes = element.class_list();
    let result = if hidden {
        classes.add_1(hidden_class)
    } else {
        classes.remove_1(hidden_class)
    };
    if let Err(e) = result {
        log::warn!("Failed to toggle '{}': {:?}", hidden_class, e);
    }
}

/// One rendered card: link target and inner markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub href: String,
    pub markup: String,
}

/// Cards for `matches`, in order. Always built from scratch.
pub fn render_cards(matches: &[CatalogProduct]) -> Vec<CardView> {
    matches
        .iter()
        .map(|product| CardView {
            href: product.url.clone(),
            markup: card_markup(product),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridVisibility {
    pub grid_hidden: bool,
    pub empty_state_hidden: bool,
}

/// Empty result: hide the grid, show the empty-state indicator
pub fn grid_visibility(matches: &[CatalogProduct]) -> GridVisibility {
    let is_empty = matches.is_empty();
    GridVisibility {
        grid_hidden: is_empty,
        empty_state_hidden: !is_empty,
    }
}

#[component]
fn ProductCard(card: CardView) -> impl IntoView {
    view! {
        <a href=card.href class=CARD_CLASS inner_html=card.markup></a>
    }
}

/// Сетка карточек товаров
///
/// Re-renders every card whenever `matches` changes. An empty list hides the
/// grid and shows the empty-state element instead.
#[component]
pub fn CatalogGrid(
    /// Результат последнего применения фильтра
    #[prop(into)]
    matches: Signal<Vec<CatalogProduct>>,
    /// Grid container (the mount parent)
    grid: web_sys::Element,
    /// Empty-state indicator supplied by the page, if any
    empty_state: Option<web_sys::Element>,
    hidden_class: &'static str,
) -> impl IntoView {
    Effect::new(move |_| {
        let visibility = matches.with(|m| grid_visibility(m));
        set_hidden(&grid, hidden_class, visibility.grid_hidden);
        if let Some(empty_state) = &empty_state {
            set_hidden(empty_state, hidden_class, visibility.empty_state_hidden);
        }
    });

    view! {
        {move || {
            matches
                .with(|m| render_cards(m))
                .into_iter()
                .map(|card| view! { <ProductCard card=card /> })
                .collect_view()
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_contains_escaped_fields() {
        let product = CatalogProduct::new("Mug <b>XL</b>", Some("home"))
            .with_price("Rp 45.000")
            .with_media("/img/mug.png", "/p/mug.html");
        let html = card_markup(&product);

        assert!(html.contains(r#"alt="Mug &lt;b&gt;XL&lt;/b&gt;""#));
        assert!(html.contains("<h4 class=\"font-semibold text-lg\">Mug &lt;b&gt;XL&lt;/b&gt;</h4>"));
        assert!(html.contains("Rp 45.000</p>"));
        assert!(html.contains(CARD_CTA));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_card_has_main_and_reflection_images() {
        let product = CatalogProduct::new("Mug", None).with_media("/img/mug.png", "/p/mug.html");
        let html = card_markup(&product);
        assert_eq!(html.matches(r#"src="/img/mug.png""#).count(), 2);
        assert!(html.contains(r#"alt="""#));
        assert!(html.contains(r#"alt="Mug""#));
    }

    #[test]
    fn test_absent_price_renders_blank() {
        let html = card_markup(&CatalogProduct::new("Mug", None));
        assert!(html.contains(r#"mt-1"></p>"#));
    }

    #[test]
    fn test_image_url_cannot_break_out_of_attribute() {
        let product = CatalogProduct::new("Mug", None)
            .with_media(r#"x.png" onerror="alert(1)"#, "/p/mug.html");
        let html = card_markup(&product);
        assert!(!html.contains(r#"onerror="alert"#));
        assert!(html.contains("x.png&quot; onerror=&quot;alert(1)"));
    }

    #[test]
    fn test_rendering_same_matches_twice_gives_same_grid() {
        use crate::domain::a001_catalog_product::ui::controller::{
            CatalogCommand, CatalogController, CatalogEvent, PageKind,
        };
        use crate::shared::url_state::FilterParams;

        let products = vec![
            CatalogProduct::new("Red Mug", Some("home")).with_media("/m.png", "/m"),
            CatalogProduct::new("Blue Shirt", Some("apparel")).with_media("/b.png", "/b"),
            CatalogProduct::new("Red Shirt", Some("apparel")).with_media("/r.png", "/r"),
        ];
        let (mut controller, _) = CatalogController::start(
            products,
            &FilterParams::default(),
            PageKind::Catalog,
            "shop.html",
            &[],
        );

        let mut grids = Vec::new();
        for _ in 0..2 {
            match controller.handle(CatalogEvent::PageSearchInput("red".into())) {
                CatalogCommand::Apply(outcome) => grids.push(render_cards(&outcome.matches)),
                other => panic!("expected Apply, got {:?}", other),
            }
        }
        assert_eq!(grids[0], grids[1]);
        let hrefs: Vec<&str> = grids[0].iter().map(|c| c.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/m", "/r"]);
    }

    #[test]
    fn test_empty_matches_show_empty_state_and_no_cards() {
        assert!(render_cards(&[]).is_empty());
        assert_eq!(
            grid_visibility(&[]),
            GridVisibility {
                grid_hidden: true,
                empty_state_hidden: false,
            }
        );
    }

    #[test]
    fn test_matches_hide_empty_state() {
        let matches = vec![CatalogProduct::new("Red Mug", Some("home"))];
        assert_eq!(
            grid_visibility(&matches),
            GridVisibility {
                grid_hidden: false,
                empty_state_hidden: true,
            }
        );
        assert_eq!(render_cards(&matches).len(), 1);
    }

    #[test]
    fn test_load_error_markup() {
        assert!(load_error_markup().contains(LOAD_ERROR_MESSAGE));
    }
}
