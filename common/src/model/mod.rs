pub mod draft;
pub mod lookup;
pub mod record;
pub mod report;
pub mod settlement;
