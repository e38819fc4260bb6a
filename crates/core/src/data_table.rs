//! Admin data-table configuration.
//!
//! The admin panel renders catalog listings through a third-party data grid.
//! This module produces the grid's props and theme as JSON: localized
//! default options merged with caller overrides, per-column width hints
//! turned into header-cell theme overrides, a loading label and a
//! viewport-dependent responsive layout.
//!
//! The caller's theme is never mutated; every function works on a copy.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Label shown in place of "no records" while rows are loading.
pub const LOADING_LABEL: &str = "Carregando...";

/// Search debounce used when the caller does not set one.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// First data column is preceded by the grid's row-selection column, and
/// `nth-child` is 1-based.
const HEADER_CHILD_OFFSET: usize = 2;

/// Viewport width class, ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    /// Whether the viewport is at or below the `sm` breakpoint.
    pub fn is_sm_or_down(self) -> bool {
        self <= Breakpoint::Sm
    }
}

/// Grid responsive layouts used by the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Responsive {
    Simple,
    Vertical,
}

impl Responsive {
    pub fn for_breakpoint(breakpoint: Breakpoint) -> Self {
        if breakpoint.is_sm_or_down() {
            Responsive::Simple
        } else {
            Responsive::Vertical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Responsive::Simple => "simple",
            Responsive::Vertical => "vertical",
        }
    }
}

/// A grid column with an optional CSS width hint (`"30%"`, `"120px"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableColumn {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Any other grid column settings, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Props accepted by the admin table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProps {
    #[serde(default)]
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub data: Vec<Value>,
    /// Grid options overriding the defaults.
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub loading: bool,
    #[serde(default)]
    pub debounced_search_time: Option<u64>,
}

/// Props to hand to the grid, and the theme to render it under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridConfig {
    pub props: Value,
    pub theme: Value,
}

/// Default grid options: printing and CSV export off, pt-BR labels and a
/// debounced search box.
pub fn default_options(debounce_ms: Option<u64>) -> Value {
    json!({
        "print": false,
        "download": false,
        "textLabels": {
            "body": {
                "noMatch": "Nenhum registro encontrado",
                "toolTip": "Classificar"
            },
            "pagination": {
                "next": "Próxima página",
                "previous": "Página anterior",
                "rowsPerPage": "Por página:",
                "displayRows": "de"
            },
            "toolbar": {
                "search": "Busca",
                "downloadCsv": "Download CSV",
                "print": "Imprimir",
                "viewColumns": "Ver Colunas",
                "filterTable": "Filtrar Tabelas"
            },
            "filter": {
                "all": "Todos",
                "title": "FILTROS",
                "reset": "LIMPAR"
            },
            "viewColumns": {
                "title": "Ver Colunas",
                "titleAria": "Ver/Esconder Colunas da Tabela"
            },
            "selectedRows": {
                "text": "registro(s) selecionados",
                "delete": "Excluir",
                "deleteAria": "Excluir registros selecionados"
            }
        },
        "customSearchRender": {
            "component": "DebouncedTableSearch",
            "debounceTime": debounce_ms.unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS)
        }
    })
}

/// Build grid props and theme from the admin table props.
pub fn build(props: &TableProps, theme: &Value, breakpoint: Breakpoint) -> GridConfig {
    let mut theme = theme.clone();

    let columns: Vec<Value> = props
        .columns
        .iter()
        .enumerate()
        .map(|(position, column)| {
            if let Some(width) = &column.width {
                object_at(&mut theme, &["overrides", "MUIDataTableHeadCell", "fixedHeader"])
                    .insert(
                        format!("&:nth-child({})", position + HEADER_CHILD_OFFSET),
                        json!({ "width": width }),
                    );
            }
            grid_column(column)
        })
        .collect();

    let mut options = default_options(props.debounced_search_time);
    deep_merge(&mut options, &props.options);

    if props.loading {
        object_at(&mut options, &["textLabels", "body"])
            .insert("noMatch".to_string(), json!(LOADING_LABEL));
    }
    object_at(&mut options, &[]).insert(
        "responsive".to_string(),
        json!(Responsive::for_breakpoint(breakpoint).as_str()),
    );

    let mut grid = Map::new();
    if let Some(title) = &props.title {
        grid.insert("title".to_string(), json!(title));
    }
    grid.insert("columns".to_string(), Value::Array(columns));
    grid.insert("data".to_string(), Value::Array(props.data.clone()));
    grid.insert("options".to_string(), options);

    GridConfig {
        props: Value::Object(grid),
        theme,
    }
}

/// Theme transform that removes vertical padding from the body cells of an
/// action column (edit/delete buttons).
pub fn make_action_styles(column: impl Display) -> impl Fn(&Value) -> Value {
    let selector = format!("&[data-testid^=\"MuiDataTableBodyCell-{column}\"]");
    move |theme: &Value| {
        let mut copy = theme.clone();
        object_at(&mut copy, &["overrides", "MUIDataTableBodyCell", "root"]).insert(
            selector.clone(),
            json!({ "paddingTop": "0px", "paddingBottom": "0px" }),
        );
        copy
    }
}

/// Recursively merge `source` into `target`.
///
/// Objects merge key by key and arrays index by index; any other source
/// value, `null` included, replaces the target value. A `null` source at the
/// top level stands for "no options" and leaves `target` untouched.
pub fn deep_merge(target: &mut Value, source: &Value) {
    if !source.is_null() {
        merge_value(target, source);
    }
}

fn merge_value(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(source)) => {
            for (index, value) in source.iter().enumerate() {
                match target.get_mut(index) {
                    Some(existing) => merge_value(existing, value),
                    None => target.push(value.clone()),
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

/// The grid's view of a column: everything except the width hint.
fn grid_column(column: &TableColumn) -> Value {
    let mut map = column.extra.clone();
    map.insert("name".to_string(), json!(column.name));
    if let Some(label) = &column.label {
        map.insert("label".to_string(), json!(label));
    }
    Value::Object(map)
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

/// Walk `path` from `root`, creating empty objects along the way.
fn object_at<'v>(root: &'v mut Value, path: &[&str]) -> &'v mut Map<String, Value> {
    let mut map = ensure_object(root);
    for key in path {
        map = ensure_object(map.entry(key.to_string()).or_insert(Value::Null));
    }
    map
}
