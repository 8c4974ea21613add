pub mod inventory_form;
pub mod leaflet;
pub mod map_selector;
pub mod report_form;
