//! Bindings to the Leaflet global loaded by `index.html`.
//!
//! Map and layer handles are opaque `JsValue`s owned by the component that
//! created them. Every function throws into `Err` instead of panicking when
//! Leaflet is missing, so a page without the script still renders its form.

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen(inline_js = "
const TILE_URL = 'https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png';
const ATTRIBUTION = '&copy; OpenStreetMap contributors';

export function leaflet_create_map(element, lat, lng, zoom, on_click) {
    const map = L.map(element).setView([lat, lng], zoom);
    L.tileLayer(TILE_URL, { attribution: ATTRIBUTION, maxZoom: 19 }).addTo(map);
    if (typeof on_click === 'function') {
        map.on('click', (e) => on_click(e.latlng.lat, e.latlng.lng));
    }
    setTimeout(() => map.invalidateSize(), 0);
    return map;
}

export function leaflet_place_marker(map, marker, lat, lng) {
    if (marker) {
        marker.setLatLng([lat, lng]);
        return marker;
    }
    return L.marker([lat, lng]).addTo(map);
}

export function leaflet_set_view(map, lat, lng, min_zoom) {
    map.setView([lat, lng], Math.max(map.getZoom(), min_zoom));
}

export function leaflet_add_point(map, lat, lng, radius, popup_html) {
    const marker = L.marker([lat, lng]).bindPopup(popup_html).addTo(map);
    if (radius > 0) {
        L.circle([lat, lng], { radius: radius, color: 'rgba(255,0,0,0.3)' }).addTo(map);
    }
    return marker;
}

export function leaflet_remove(map) {
    map.remove();
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    pub fn leaflet_create_map(
        element: &HtmlElement,
        lat: f64,
        lng: f64,
        zoom: u8,
        on_click: &JsValue,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub fn leaflet_place_marker(
        map: &JsValue,
        marker: &JsValue,
        lat: f64,
        lng: f64,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub fn leaflet_set_view(
        map: &JsValue,
        lat: f64,
        lng: f64,
        min_zoom: u8,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    pub fn leaflet_add_point(
        map: &JsValue,
        lat: f64,
        lng: f64,
        radius: f64,
        popup_html: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub fn leaflet_remove(map: &JsValue) -> Result<(), JsValue>;
}
