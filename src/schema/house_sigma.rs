use super::Schema;
use once_cell::sync::Lazy;

use super::FieldType::{Category, Datetime64, Float64, Int32, Object};

/// Fields kept from a flattened listing, with the column types the table
/// loader reads them as
pub static HOUSE_SIGMA_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new([
        ("ml_num", Object),
        ("house_type_name", Category),
        ("house_style", Category),
        ("address", Object),
        ("community_name", Category),
        ("municipality_name", Category),
        ("bedroom", Int32),
        ("bedroom_plus", Int32),
        ("washroom", Int32),
        ("parking/total", Int32),
        ("parking/garage_type", Category),
        ("parking/garage", Int32),
        ("parking/parking_type", Category),
        ("parking/parking", Int32),
        ("price_int", Int32),
        ("tax_int", Int32),
        ("tax_year", Int32),
        ("build_year", Category),
        ("price_sold_int", Int32),
        ("map/lat", Float64),
        ("map/lon", Float64),
        ("house_area/estimate", Int32),
        ("land/front", Float64),
        ("land/depth", Float64),
        ("date_added", Datetime64),
        ("date_start", Datetime64),
        ("date_update", Datetime64),
        ("date_end", Datetime64),
        ("list_days", Int32),
        ("estimate_price_date", Datetime64),
        ("estimate_price", Object),
        ("scores/school", Int32),
        ("scores/land", Int32),
        ("scores/rent", Int32),
        ("scores/growth", Int32),
        ("basement", Category),
        ("air_condition", Category),
        ("heat_type", Category),
        ("construction", Category),
        ("description1", Object),
        ("brokerage", Category),
    ])
});
