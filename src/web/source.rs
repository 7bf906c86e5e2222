//! JavaScript-backed dataset, renderer and configuration reading.

use std::fmt;

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::config::GridOptions;
use crate::data::{CellRenderer, DataSource};
use crate::error::{GridError, Result};
use crate::render::DomSurface;
use crate::schedule::UpdateClass;
use crate::types::{CellContent, ColumnDescriptor, RowDescriptor};

fn to_usize(length: u32) -> usize {
    usize::try_from(length).unwrap_or(usize::MAX)
}

fn to_js_index(index: usize) -> JsValue {
    u32::try_from(index).map_or(JsValue::UNDEFINED, JsValue::from)
}

/// A value read out of the JavaScript dataset.
#[derive(Debug, Clone)]
pub struct JsCell(pub JsValue);

impl fmt::Display for JsCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.0.as_string() {
            f.write_str(&text)
        } else if let Some(number) = self.0.as_f64() {
            write!(f, "{number}")
        } else if let Some(flag) = self.0.as_bool() {
            write!(f, "{flag}")
        } else if self.0.is_undefined() || self.0.is_null() {
            Ok(())
        } else {
            write!(f, "{:?}", self.0)
        }
    }
}

/// Array of arrays, read lazily.
pub struct JsData {
    rows: Array,
}

impl JsData {
    pub fn new(rows: Array) -> Self {
        Self { rows }
    }

    fn row(&self, row: usize) -> Option<Array> {
        let index = u32::try_from(row).ok()?;
        self.rows.get(index).dyn_into::<Array>().ok()
    }
}

impl DataSource for JsData {
    type Value = JsCell;

    fn row_count(&self) -> usize {
        to_usize(self.rows.length())
    }

    fn row_len(&self, row: usize) -> usize {
        self.row(row).map_or(0, |r| to_usize(r.length()))
    }

    fn value(&self, row: usize, key: usize) -> Option<JsCell> {
        let value = self.row(row)?.get(u32::try_from(key).ok()?);
        if value.is_undefined() {
            None
        } else {
            Some(JsCell(value))
        }
    }
}

/// `renderer(row, column, value)` supplied by the page.
///
/// The function may return a descriptor object or a plain string (taken as
/// the content).
pub struct JsRenderer {
    function: Function,
}

impl CellRenderer<JsCell> for JsRenderer {
    fn render(&self, row: usize, column: usize, value: Option<&JsCell>) -> Result<CellContent> {
        let undefined = JsValue::UNDEFINED;
        let value = value.map_or(&undefined, |v| &v.0);
        let result = self
            .function
            .call3(&JsValue::NULL, &to_js_index(row), &to_js_index(column), value)
            .map_err(|e| GridError::Renderer(format!("{e:?}")))?;
        if let Some(text) = result.as_string() {
            return Ok(CellContent::text(text));
        }
        serde_wasm_bindgen::from_value(result).map_err(|e| GridError::Renderer(e.to_string()))
    }
}

/// Consumer callbacks, invoked after the grid borrow is released.
#[derive(Default)]
pub struct JsCallbacks {
    scroll: Option<Function>,
    resize: Option<Function>,
}

impl JsCallbacks {
    pub fn invoke(&self, class: UpdateClass) {
        let callback = match class {
            UpdateClass::Scroll => self.scroll.as_ref(),
            UpdateClass::Resize => self.resize.as_ref(),
        };
        if let Some(callback) = callback {
            if let Err(err) = callback.call0(&JsValue::NULL) {
                log::error!("[grid] {class:?} callback threw: {err:?}");
            }
        }
    }
}

/// The `BigGrid` constructor argument, read field by field.
pub struct JsConfig {
    pub mount: Option<DomSurface>,
    pub data: Option<JsData>,
    pub rows: Option<Vec<RowDescriptor>>,
    pub columns: Option<Vec<ColumnDescriptor>>,
    pub renderer: Option<JsRenderer>,
    pub callbacks: JsCallbacks,
    pub options: GridOptions,
}

fn get(target: &JsValue, key: &str) -> JsValue {
    if target.is_object() {
        Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
    } else {
        JsValue::UNDEFINED
    }
}

fn function(value: JsValue) -> Option<Function> {
    value.dyn_into::<Function>().ok()
}

/// Descriptor list, honored only when the value is an array.
fn descriptors<T: serde::de::DeserializeOwned>(value: JsValue, name: &str) -> Result<Option<T>> {
    if !Array::is_array(&value) {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| GridError::Config(format!("{name}: {e}")))
}

/// Optional scalar setting; present but malformed is an error.
fn setting<T: serde::de::DeserializeOwned>(config: &JsValue, key: &str) -> Result<Option<T>> {
    let value = get(config, key);
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| GridError::Config(format!("{key}: {e}")))
}

impl JsConfig {
    pub fn read(config: &JsValue) -> Result<Self> {
        let mount = DomSurface::resolve(&get(config, "mount"))?;

        let data = get(config, "data");
        let data = if data.is_undefined() || data.is_null() {
            None
        } else {
            let rows = data
                .dyn_into::<Array>()
                .map_err(|_| GridError::Config("data must be an array of arrays".to_string()))?;
            Some(JsData::new(rows))
        };

        let mut options = GridOptions::default();
        if let Some(overscan) = setting(config, "overscan")? {
            options.overscan = overscan;
        }
        if let Some(height) = setting(config, "rowHeight")? {
            options.default_row_height = height;
        }
        if let Some(width) = setting(config, "columnWidth")? {
            options.default_column_width = width;
        }

        Ok(Self {
            mount,
            data,
            rows: descriptors(get(config, "rows"), "rows")?,
            columns: descriptors(get(config, "columns"), "columns")?,
            renderer: function(get(config, "renderer")).map(|function| JsRenderer { function }),
            callbacks: JsCallbacks {
                scroll: function(get(&get(config, "scroll"), "callback")),
                resize: function(get(&get(config, "resize"), "callback")),
            },
            options,
        })
    }
}
