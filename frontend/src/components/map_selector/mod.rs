//! Map point selector.
//!
//! Shows a Leaflet map centered on the draft's coordinates (or the center of
//! Ukraine) and reports every click as `(lat, lng)` through `on_select`. The
//! marker is component-internal: it follows clicks immediately and follows the
//! `latitude`/`longitude` props whenever they change to a different valid point,
//! e.g. after the form auto-filled coordinates from the lookup index. Only the
//! latter pans the map, since a clicked point is already in view.

use common::map::{
    center_for, click_move, external_move, format_coordinate, MarkerMove, DEFAULT_ZOOM, FOLLOW_ZOOM,
};
use gloo_console::warn;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::components::leaflet::{
    leaflet_create_map, leaflet_place_marker, leaflet_remove, leaflet_set_view,
};

#[derive(Properties, PartialEq, Clone)]
pub struct MapSelectorProps {
    pub latitude: AttrValue,
    pub longitude: AttrValue,
    pub on_select: Callback<(f64, f64)>,
}

pub enum Msg {
    Clicked(f64, f64),
}

pub struct MapSelector {
    container_ref: NodeRef,
    map: Option<JsValue>,
    marker: JsValue,
    shown: Option<(f64, f64)>,
    on_click: Option<Closure<dyn FnMut(f64, f64)>>,
}

impl MapSelector {
    fn apply(&mut self, step: MarkerMove) {
        let Some(map) = &self.map else {
            return;
        };
        let (lat, lng) = step.point;
        match leaflet_place_marker(map, &self.marker, lat, lng) {
            Ok(marker) => {
                self.marker = marker;
                self.shown = Some(step.point);
            }
            Err(e) => {
                warn!("Failed to place marker", e);
                return;
            }
        }
        if step.recenter {
            if let Err(e) = leaflet_set_view(map, lat, lng, FOLLOW_ZOOM) {
                warn!("Failed to recenter map", e);
            }
        }
    }

    fn sync_with_props(&mut self, props: &MapSelectorProps) {
        if let Some(step) = external_move(self.shown, &props.latitude, &props.longitude) {
            self.apply(step);
        }
    }
}

impl Component for MapSelector {
    type Message = Msg;
    type Properties = MapSelectorProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            container_ref: NodeRef::default(),
            map: None,
            marker: JsValue::NULL,
            shown: None,
            on_click: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Clicked(lat, lng) => {
                self.apply(click_move(lat, lng));
                ctx.props().on_select.emit((lat, lng));
                false
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.sync_with_props(ctx.props());
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="map-selector">
                <div class="map-container" ref={self.container_ref.clone()} style="height: 16rem;" />
                <p class="map-hint">
                    { format!("Натисніть на карту, щоб вибрати координати: {}, {}", props.latitude, props.longitude) }
                </p>
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let Some(element) = self.container_ref.cast::<HtmlElement>() else {
            return;
        };
        let props = ctx.props();
        let (lat, lng) = center_for(&props.latitude, &props.longitude);

        let link = ctx.link().clone();
        let on_click = Closure::<dyn FnMut(f64, f64)>::new(move |lat: f64, lng: f64| {
            link.send_message(Msg::Clicked(lat, lng));
        });
        match leaflet_create_map(&element, lat, lng, DEFAULT_ZOOM, on_click.as_ref()) {
            Ok(map) => {
                self.map = Some(map);
                self.on_click = Some(on_click);
                self.sync_with_props(props);
            }
            Err(e) => warn!(
                format!("Map unavailable at {}, {}", format_coordinate(lat), format_coordinate(lng)),
                e
            ),
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(map) = self.map.take() {
            leaflet_remove(&map).ok();
        }
    }
}
