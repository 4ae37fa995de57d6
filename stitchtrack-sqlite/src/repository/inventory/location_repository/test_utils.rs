use heapless::String as HeaplessString;
use stitchtrack_db::models::inventory::LocationModel;

pub fn create_test_location(name: &str, description: Option<&str>) -> LocationModel {
    LocationModel {
        id: 0,
        name: HeaplessString::try_from(name).unwrap(),
        description: description.map(|d| HeaplessString::try_from(d).unwrap()),
    }
}
