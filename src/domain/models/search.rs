use serde::{Deserialize, Deserializer, Serialize};

use super::convocatoria::Convocatoria;

/// Keys appended per request, never stored in a captured query
pub const PAGING_KEYS: [&str; 2] = ["page", "pageSize"];

/// Non-empty form fields captured by a fresh search
///
/// Keys are unique and keep the order in which they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    fields: Vec<(String, String)>,
}

impl SearchQuery {
    /// Build from `(name, value)` pairs, dropping empty values and paging keys
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in fields {
            query.insert(key.into(), value.into());
        }
        query
    }

    fn insert(&mut self, key: String, value: String) {
        if value.trim().is_empty() || PAGING_KEYS.contains(&key.as_str()) {
            return;
        }
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Query fields followed by `page` and `pageSize`
    pub fn to_request_params(&self, page: u32, page_size: u32) -> Vec<(String, String)> {
        let mut params = self.fields.clone();
        params.push(("page".to_string(), page.to_string()));
        params.push(("pageSize".to_string(), page_size.to_string()));
        params
    }
}

/// Percent-encoded `key=value&...` query string
pub fn encode_query_string(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// How `descripcion` words are matched by the search API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionMatch {
    AllWords,
    AnyWord,
    ExactPhrase,
}

impl DescriptionMatch {
    pub const ALL: [DescriptionMatch; 3] = [
        DescriptionMatch::AllWords,
        DescriptionMatch::AnyWord,
        DescriptionMatch::ExactPhrase,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DescriptionMatch::AllWords => "1",
            DescriptionMatch::AnyWord => "2",
            DescriptionMatch::ExactPhrase => "0",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DescriptionMatch::AllWords => "Todas las palabras",
            DescriptionMatch::AnyWord => "Cualquiera de las palabras",
            DescriptionMatch::ExactPhrase => "Frase exacta",
        }
    }
}

/// Editable state of the advanced search form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub descripcion: String,
    pub descripcion_tipo_busqueda: String,
    pub fecha_desde: String,
    pub fecha_hasta: String,
    pub tipo_administracion: String,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            descripcion: String::new(),
            descripcion_tipo_busqueda: DescriptionMatch::AllWords.code().to_string(),
            fecha_desde: String::new(),
            fecha_hasta: String::new(),
            tipo_administracion: String::new(),
        }
    }
}

impl SearchForm {
    /// Serialize the form the way a browser form submission would
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery::from_fields([
            ("descripcion", self.descripcion.as_str()),
            ("descripcionTipoBusqueda", self.descripcion_tipo_busqueda.as_str()),
            ("fechaDesde", self.fecha_desde.as_str()),
            ("fechaHasta", self.fecha_hasta.as_str()),
            ("tipoAdministracion", self.tipo_administracion.as_str()),
        ])
    }
}

/// One page of search results
///
/// Missing or `null` keys decode to their defaults, so `{"content": null}` is an empty page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPage {
    #[serde(rename = "content", default, deserialize_with = "null_as_default")]
    pub items: Vec<Convocatoria>,
    #[serde(rename = "totalElements", default, deserialize_with = "null_as_default")]
    pub total_items: u64,
    #[serde(rename = "size", default, deserialize_with = "null_as_default")]
    pub page_size: u32,
    #[serde(rename = "totalPages", default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
    /// Zero-based
    #[serde(rename = "number", default, deserialize_with = "null_as_default")]
    pub page_index: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SearchResultPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// "Mostrando N de T resultados. Página P de TP."
    pub fn summary_line(&self) -> String {
        format!(
            "Mostrando {} de {} resultados. Página {} de {}.",
            self.items.len(),
            self.total_items,
            self.page_index + 1,
            self.total_pages
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_drops_empty_values_and_paging_keys() {
        let query = SearchQuery::from_fields([
            ("descripcion", "vivienda"),
            ("fechaDesde", ""),
            ("page", "3"),
            ("pageSize", "10"),
            ("tipoAdministracion", "C"),
        ]);
        assert_eq!(query.len(), 2);
        assert_eq!(query.get("descripcion"), Some("vivienda"));
        assert_eq!(query.get("fechaDesde"), None);
        assert_eq!(query.get("page"), None);
    }

    #[test]
    fn test_query_keys_are_unique() {
        let query = SearchQuery::from_fields([("a", "1"), ("b", "2"), ("a", "3")]);
        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_request_params_append_paging() {
        let query = SearchQuery::from_fields([("descripcion", "agua")]);
        let params = query.to_request_params(2, 50);
        assert_eq!(
            params,
            vec![
                ("descripcion".to_string(), "agua".to_string()),
                ("page".to_string(), "2".to_string()),
                ("pageSize".to_string(), "50".to_string()),
            ]
        );
        assert_eq!(
            encode_query_string(&params),
            "descripcion=agua&page=2&pageSize=50"
        );
    }

    #[test]
    fn test_encode_query_string_escapes() {
        let params = vec![("descripcion".to_string(), "energía solar".to_string())];
        assert_eq!(encode_query_string(&params), "descripcion=energ%C3%ADa%20solar");
    }

    #[test]
    fn test_form_to_query_keeps_default_match_mode() {
        let form = SearchForm {
            descripcion: "becas".to_string(),
            ..SearchForm::default()
        };
        let query = form.to_query();
        assert_eq!(query.get("descripcion"), Some("becas"));
        assert_eq!(query.get("descripcionTipoBusqueda"), Some("1"));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_result_page_decodes_api_names() {
        let page: SearchResultPage = serde_json::from_value(json!({
            "content": [{"BDNS": "1"}, {"BDNS": "2"}],
            "totalElements": 120,
            "size": 50,
            "totalPages": 3,
            "number": 1
        }))
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.summary_line(), "Mostrando 2 de 120 resultados. Página 2 de 3.");
    }

    #[test]
    fn test_result_page_missing_keys_default() {
        let page: SearchResultPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_result_page_null_keys_default() {
        let page: SearchResultPage = serde_json::from_value(json!({
            "content": null,
            "totalElements": null,
            "size": 50,
            "totalPages": null,
            "number": null
        }))
        .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_items, 0);
        assert_eq!(page.page_size, 50);
        assert_eq!(page.page_index, 0);
    }
}
