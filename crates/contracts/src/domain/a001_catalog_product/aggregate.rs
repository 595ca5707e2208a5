use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Aggregate
// ============================================================================

/// Товар каталога, как он приходит из `products.json`
///
/// Read-only for the whole page session: the list is fetched once and only
/// re-sliced by the filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Отображаемое название
    #[serde(default)]
    pub name: String,

    /// Цена в виде готовой к показу строки
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<String>,

    /// Идентификатор категории (совпадает с `data-cat` вкладки)
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    /// Краткое описание: участвует в поиске, но не выводится
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub short: Option<String>,

    /// URL изображения
    #[serde(default)]
    pub img: String,

    /// Ссылка карточки
    #[serde(default)]
    pub url: String,
}

impl CatalogProduct {
    pub fn new(name: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            name: name.into(),
            category: category.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_media(mut self, img: impl Into<String>, url: impl Into<String>) -> Self {
        self.img = img.into();
        self.url = url.into();
        self
    }
}

/// Accepts a string, number or boolean and keeps its textual form.
/// `null` and nested values are treated as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Parse the body of the catalog endpoint (a JSON array of products)
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogProduct>, serde_json::Error> {
    serde_json::from_str(json)
}
