//! Browser DOM surface.
//!
//! Builds the grid structure inside a mount element:
//!
//! ```text
//! .big-grid
//!   .big-grid__corner
//!   .big-grid__header  > .big-grid__header__virtual   (header layer)
//!   .big-grid__counter > .big-grid__counter__virtual  (counter layer)
//!   .big-grid__main    > .big-grid__main__virtual     (data layer, scrolls)
//! ```
//!
//! Pooled nodes are plain `div`s. Data cells carry their identity token in
//! the `cell` attribute and are focusable.

use js_sys::{Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, FocusOptions, HtmlElement, KeyboardEvent};

use super::surface::{Layer, NodeContent, NodePaint, Surface};
use crate::error::{GridError, Result};
use crate::layout::Viewport;
use crate::types::CellId;

/// Attribute holding a data cell's identity token.
pub const TOKEN_ATTRIBUTE: &str = "cell";

fn js_err(err: JsValue) -> GridError {
    GridError::Surface(format!("{err:?}"))
}

struct LayerHost {
    parent: HtmlElement,
    container: HtmlElement,
}

impl LayerHost {
    fn detach(&self) {
        let _ = self.parent.remove_child(&self.container);
    }

    fn attach(&self) {
        if self.container.parent_node().is_none() {
            let _ = self.parent.append_child(&self.container);
        }
    }
}

struct Hosts {
    main: HtmlElement,
    header: LayerHost,
    counter: LayerHost,
    cells: LayerHost,
}

impl Hosts {
    fn get(&self, layer: Layer) -> &LayerHost {
        match layer {
            Layer::Header => &self.header,
            Layer::Counter => &self.counter,
            Layer::Cells => &self.cells,
        }
    }
}

/// Surface rendering into live DOM elements.
pub struct DomSurface {
    document: Document,
    mount: Element,
    hosts: Option<Hosts>,
    key_listener: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl DomSurface {
    pub fn new(mount: Element) -> Result<Self> {
        let document = mount
            .owner_document()
            .or_else(|| web_sys::window().and_then(|w| w.document()))
            .ok_or_else(|| GridError::Surface("no document".to_string()))?;
        Ok(Self {
            document,
            mount,
            hosts: None,
            key_listener: None,
        })
    }

    /// Resolve a mount option: a CSS selector or an element.
    ///
    /// `undefined`/`null` resolve to `None` so the grid reports the missing
    /// mount itself.
    pub fn resolve(mount: &JsValue) -> Result<Option<Self>> {
        if mount.is_undefined() || mount.is_null() {
            return Ok(None);
        }
        if let Some(selector) = mount.as_string() {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| GridError::Surface("no document".to_string()))?;
            let element = document
                .query_selector(&selector)
                .ok()
                .flatten()
                .ok_or(GridError::UnresolvedMount(selector))?;
            return Self::new(element).map(Some);
        }
        match mount.dyn_ref::<Element>() {
            Some(element) => Self::new(element.clone()).map(Some),
            None => Err(GridError::Config(
                "mount must be a selector or an Element".to_string(),
            )),
        }
    }

    /// Listener attached to every data cell node as it is created. The
    /// surface owns it, so it lives as long as any node that carries it.
    pub fn set_key_listener(&mut self, listener: Closure<dyn FnMut(KeyboardEvent)>) {
        self.key_listener = Some(listener);
    }

    fn key_callback(&self) -> Option<&Function> {
        self.key_listener.as_ref().map(|l| l.as_ref().unchecked_ref())
    }

    /// The scrolling element, once mounted.
    pub fn main(&self) -> Option<&HtmlElement> {
        self.hosts.as_ref().map(|h| &h.main)
    }

    fn create_div(&self, class: &str) -> Result<HtmlElement> {
        let element = self
            .document
            .create_element("div")
            .map_err(js_err)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| GridError::Surface("div is not an HtmlElement".to_string()))?;
        if !class.is_empty() {
            element.set_class_name(class);
        }
        Ok(element)
    }

    /// A `wrapper > virtual` pair, the virtual element being the layer.
    fn create_host(&self, name: &str, root: &HtmlElement) -> Result<LayerHost> {
        let parent = self.create_div(&format!("big-grid__{name}"))?;
        let container = self.create_div(&format!("big-grid__{name}__virtual"))?;
        parent.append_child(&container).map_err(js_err)?;
        root.append_child(&parent).map_err(js_err)?;
        Ok(LayerHost { parent, container })
    }

    fn clear_mount(&self) {
        while let Some(child) = self.mount.first_child() {
            if self.mount.remove_child(&child).is_err() {
                break;
            }
        }
    }
}

fn read_f64(target: &JsValue, property: &str) -> f64 {
    Reflect::get(target, &JsValue::from_str(property))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Token of the nearest element at or above `target` that carries a valid one.
pub fn resolve_token(target: Option<EventTarget>) -> Option<CellId> {
    let mut element = target?.dyn_into::<Element>().ok();
    while let Some(current) = element {
        if let Some(cell) = current
            .get_attribute(TOKEN_ATTRIBUTE)
            .and_then(|token| token.parse().ok())
        {
            return Some(cell);
        }
        element = current.parent_element();
    }
    None
}

impl Surface for DomSurface {
    type Node = HtmlElement;

    fn mount(&mut self, total_width: f64, total_height: f64) -> Result<()> {
        self.clear_mount();

        let root = self.create_div("big-grid")?;
        root.append_child(&self.create_div("big-grid__corner")?)
            .map_err(js_err)?;
        let header = self.create_host("header", &root)?;
        let counter = self.create_host("counter", &root)?;
        let cells = self.create_host("main", &root)?;

        let style = cells.container.style();
        style
            .set_property("height", &px(total_height))
            .map_err(js_err)?;
        style.set_property("width", &px(total_width)).map_err(js_err)?;
        counter
            .container
            .style()
            .set_property("height", &px(total_height))
            .map_err(js_err)?;
        header
            .container
            .style()
            .set_property("width", &px(total_width))
            .map_err(js_err)?;

        self.mount.append_child(&root).map_err(js_err)?;
        self.hosts = Some(Hosts {
            main: cells.parent.clone(),
            header,
            counter,
            cells,
        });
        Ok(())
    }

    fn unmount(&mut self) {
        self.hosts = None;
        self.clear_mount();
    }

    fn measure(&self) -> Viewport {
        let Some(hosts) = &self.hosts else {
            return Viewport::new(0.0, 0.0);
        };
        let main = &hosts.main;
        Viewport {
            scroll_x: read_f64(main, "scrollLeft"),
            scroll_y: read_f64(main, "scrollTop"),
            width: f64::from(main.offset_width()),
            height: f64::from(main.offset_height()),
            client_width: f64::from(main.client_width()),
            client_height: f64::from(main.client_height()),
        }
    }

    fn set_scroll(&mut self, scroll_x: f64, scroll_y: f64) {
        if let Some(hosts) = &self.hosts {
            let _ = Reflect::set(&hosts.main, &"scrollLeft".into(), &scroll_x.into());
            let _ = Reflect::set(&hosts.main, &"scrollTop".into(), &scroll_y.into());
        }
    }

    fn create_node(&mut self, layer: Layer) -> Result<HtmlElement> {
        let node = self.create_div("")?;
        if layer == Layer::Cells {
            node.set_tab_index(0);
            if let Some(listener) = self.key_callback() {
                node.add_event_listener_with_callback("keydown", listener)
                    .map_err(js_err)?;
            }
        }
        let hosts = self
            .hosts
            .as_ref()
            .ok_or_else(|| GridError::Surface("surface is not mounted".to_string()))?;
        hosts
            .get(layer)
            .container
            .append_child(&node)
            .map_err(js_err)?;
        Ok(node)
    }

    fn paint_node(&mut self, node: &HtmlElement, paint: &NodePaint) -> Result<()> {
        match paint.token {
            Some(token) => node
                .set_attribute(TOKEN_ATTRIBUTE, &token.to_string())
                .map_err(js_err)?,
            None => {
                let _ = node.remove_attribute(TOKEN_ATTRIBUTE);
            }
        }
        node.set_class_name(&paint.class_name);
        node.style().set_css_text(&paint.css_text());
        node.set_title(&paint.title);
        match &paint.content {
            NodeContent::Text(text) => node.set_text_content(Some(text)),
            NodeContent::Markup(markup) => node.set_inner_html(markup),
        }
        Ok(())
    }

    fn remove_node(&mut self, _layer: Layer, node: HtmlElement) {
        if let Some(listener) = self.key_callback() {
            let _ = node.remove_event_listener_with_callback("keydown", listener);
        }
        node.remove();
    }

    fn detach_layer(&mut self, layer: Layer) {
        if let Some(hosts) = &self.hosts {
            hosts.get(layer).detach();
        }
    }

    fn attach_layer(&mut self, layer: Layer) {
        if let Some(hosts) = &self.hosts {
            hosts.get(layer).attach();
        }
    }

    fn set_layer_offset(&mut self, layer: Layer, offset: f64) {
        let Some(hosts) = &self.hosts else {
            return;
        };
        let property = match layer {
            Layer::Header => "left",
            Layer::Counter => "top",
            Layer::Cells => return,
        };
        let _ = hosts
            .get(layer)
            .container
            .style()
            .set_property(property, &px(offset));
    }

    fn focus_node(&mut self, node: &HtmlElement) {
        let options = FocusOptions::new();
        options.set_prevent_scroll(true);
        let _ = node.focus_with_options(&options);
    }

    fn activate_node(&mut self, node: &HtmlElement) {
        if let Some(inner) = node
            .first_element_child()
            .and_then(|child| child.dyn_into::<HtmlElement>().ok())
        {
            let _ = inner.focus();
        }
    }
}
