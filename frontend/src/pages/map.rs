//! Map of every approved record that has coordinates.
//!
//! Region marks get a circle of `REGION_MARK_RADIUS_METERS` around the point.
//! Popups link to the record page.

use common::map::{DEFAULT_CENTER, DEFAULT_ZOOM, REGION_MARK_RADIUS_METERS};
use common::model::record::{record_url, MarkType};
use common::requests::MapPoint;
use gloo_console::warn;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::leaflet::{leaflet_add_point, leaflet_create_map, leaflet_remove};
use crate::helpers::{escape_html, show_toast};

pub enum Msg {
    Loaded(Result<Vec<MapPoint>, String>),
}

pub struct MapPage {
    container_ref: NodeRef,
    map: Option<JsValue>,
    points: Vec<MapPoint>,
}

fn popup_html(point: &MapPoint) -> String {
    let name = point.current_settlement_name.as_deref().unwrap_or("Без назви");
    format!(
        "<b>{}</b><br><a href=\"{}\">Переглянути інвентар</a>",
        escape_html(name),
        escape_html(&record_url(&point.id))
    )
}

fn radius_for(point: &MapPoint) -> f64 {
    match point.mark_type.and_then(MarkType::from_code) {
        Some(MarkType::Region) => REGION_MARK_RADIUS_METERS,
        _ => 0.0,
    }
}

impl MapPage {
    fn draw_points(&self) {
        let Some(map) = &self.map else {
            return;
        };
        for point in &self.points {
            if let Err(e) = leaflet_add_point(
                map,
                point.latitude,
                point.longitude,
                radius_for(point),
                &popup_html(point),
            ) {
                warn!("Failed to add point", e);
            }
        }
    }
}

impl Component for MapPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::fetch_map_points().await));
        });
        Self {
            container_ref: NodeRef::default(),
            map: None,
            points: Vec::new(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(points)) => {
                self.points = points;
                self.draw_points();
            }
            Msg::Loaded(Err(e)) => show_toast(&format!("Помилка завантаження карти: {}", e)),
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <section class="map-page">
                <h1>{"Карта інвентарів"}</h1>
                <div class="map-container" ref={self.container_ref.clone()} style="height: 70vh;" />
                <p>{ format!("Позначок на карті: {}", self.points.len()) }</p>
            </section>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let Some(element) = self.container_ref.cast::<HtmlElement>() else {
            return;
        };
        let (lat, lng) = DEFAULT_CENTER;
        match leaflet_create_map(&element, lat, lng, DEFAULT_ZOOM, &JsValue::NULL) {
            Ok(map) => {
                self.map = Some(map);
                self.draw_points();
            }
            Err(e) => warn!("Map unavailable", e),
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(map) = self.map.take() {
            leaflet_remove(&map).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(mark_type: Option<i64>, name: Option<&str>) -> MapPoint {
        MapPoint {
            id: "7".into(),
            latitude: 50.0,
            longitude: 30.0,
            mark_type,
            current_settlement_name: name.map(str::to_string),
        }
    }

    #[test]
    fn only_region_marks_get_a_circle() {
        assert_eq!(radius_for(&point(Some(2), None)), REGION_MARK_RADIUS_METERS);
        assert_eq!(radius_for(&point(Some(1), None)), 0.0);
        assert_eq!(radius_for(&point(None, None)), 0.0);
    }

    #[test]
    fn popup_escapes_settlement_name() {
        let html = popup_html(&point(Some(1), Some("<script>")));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("href=\"/record/7\""));
    }
}
