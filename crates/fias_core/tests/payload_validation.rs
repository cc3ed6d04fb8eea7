use fias_core::{
    AddressPayload, AddressService, ComposeError, InMemorySynonymDictionary,
    InMemoryTypeDictionary,
};
use serde_json::{json, Value};

const REGION_GUID: &str = "6f2cbfd8-692a-4ee4-9b16-067210bde3fc";
const TARGET_GUID: &str = "9a5cdb5d-5a05-4f34-ba90-3b2930ca2a78";

#[test]
fn stead_target_is_rejected_with_the_canonical_message() {
    let err = service()
        .compose(&payload(
            2,
            "1.2",
            vec![region_entry(), plot_entry("stead", 9)],
        ))
        .unwrap_err();

    assert_eq!(err, ComposeError::UnsupportedLevel);
    assert_eq!(err.to_string(), "Unsupported address level.");
}

#[test]
fn car_place_target_is_rejected() {
    let err = service()
        .compose(&payload(
            2,
            "1.2",
            vec![region_entry(), plot_entry("carplace", 17)],
        ))
        .unwrap_err();
    assert_eq!(err, ComposeError::UnsupportedLevel);
}

#[test]
fn unknown_relation_tags_are_rejected() {
    let err = service()
        .compose(&payload(
            2,
            "1.2",
            vec![region_entry(), plot_entry("division", 8)],
        ))
        .unwrap_err();
    assert_eq!(err, ComposeError::UnsupportedLevel);
}

#[test]
fn stead_ancestors_are_rejected_too() {
    let mut house = json!({
        "id": 30,
        "objectid": 3,
        "objectguid": TARGET_GUID,
        "level": 10,
        "previd": 0,
        "nextid": 0,
        "startdate": "1900-01-01",
        "enddate": "2079-06-06"
    });
    house["housenum"] = json!("5");
    house["housetype"] = json!(2);

    let err = service()
        .compose(&payload(
            3,
            "1.2.3",
            vec![
                region_entry(),
                plot_entry("stead", 9),
                entry(wide_params(), "house", house, true, true),
            ],
        ))
        .unwrap_err();
    assert_eq!(err, ComposeError::UnsupportedLevel);
}

#[test]
fn unparseable_path_is_malformed() {
    let broken = payload(2, "1.два.2", vec![region_entry()]);
    let err = service().compose(&broken).unwrap_err();
    assert!(matches!(err, ComposeError::MalformedPayload(_)));
}

#[test]
fn path_not_ending_at_the_target_is_malformed() {
    let broken = payload(9, "1.2", vec![region_entry()]);
    let err = service().compose(&broken).unwrap_err();
    assert!(matches!(err, ComposeError::MalformedPayload(_)));
    assert!(err.to_string().contains("does not end at target object 9"));
}

#[test]
fn unparseable_parents_json_is_malformed() {
    let mut broken = payload(1, "1", vec![]);
    broken.parents = "[{".to_string();
    let err = service().compose(&broken).unwrap_err();
    assert!(matches!(err, ComposeError::MalformedPayload(_)));
    assert!(err.to_string().contains("not valid JSON"));
}

#[test]
fn records_off_the_path_are_malformed() {
    let stray = entry(
        wide_params(),
        "addr_obj",
        addr_obj_data(77, 555, 5, "Уфа", "г"),
        true,
        true,
    );
    let err = service()
        .compose(&payload(1, "1", vec![region_entry(), stray]))
        .unwrap_err();
    assert!(matches!(err, ComposeError::MalformedPayload(_)));
    assert!(err.to_string().contains("object 555"));
}

#[test]
fn a_path_node_without_records_is_malformed() {
    let err = service()
        .compose(&payload(2, "1.2", vec![city_target_entry()]))
        .unwrap_err();
    assert!(matches!(err, ComposeError::MalformedPayload(_)));
    assert!(err.to_string().contains("path object 1"));
}

#[test]
fn a_node_without_attribute_snapshots_is_an_empty_attribute_set() {
    let bare = entry(
        json!([]),
        "addr_obj",
        addr_obj_data(10, 1, 1, "Башкортостан", "Респ"),
        true,
        true,
    );
    let err = service().compose(&payload(1, "1", vec![bare])).unwrap_err();
    assert_eq!(err, ComposeError::EmptyAttributeSet { object_id: 1 });
}

#[test]
fn a_house_without_any_number_is_malformed() {
    let bare_house = json!({
        "id": 30,
        "objectid": 2,
        "objectguid": TARGET_GUID,
        "level": 10,
        "previd": 0,
        "nextid": 0,
        "startdate": "1900-01-01",
        "enddate": "2079-06-06"
    });
    let err = service()
        .compose(&payload(
            2,
            "1.2",
            vec![
                region_entry(),
                entry(wide_params(), "house", bare_house, true, true),
            ],
        ))
        .unwrap_err();
    assert!(matches!(err, ComposeError::MalformedPayload(_)));
    assert!(err.to_string().contains("carries no number"));
}

#[test]
fn an_apartment_without_its_number_is_malformed() {
    let bare_flat = json!({
        "id": 40,
        "objectid": 2,
        "objectguid": TARGET_GUID,
        "level": 11,
        "aparttype": 2,
        "previd": 0,
        "nextid": 0,
        "startdate": "1900-01-01",
        "enddate": "2079-06-06"
    });
    let err = service()
        .compose(&payload(
            2,
            "1.2",
            vec![
                region_entry(),
                entry(wide_params(), "apartment", bare_flat, true, true),
            ],
        ))
        .unwrap_err();
    assert!(matches!(err, ComposeError::MalformedPayload(_)));
}

#[test]
fn an_address_object_without_a_name_is_malformed() {
    let nameless = json!({
        "id": 50,
        "objectid": 1,
        "objectguid": REGION_GUID,
        "level": 1,
        "typename": "Респ",
        "previd": 0,
        "nextid": 0,
        "startdate": "1900-01-01",
        "enddate": "2079-06-06"
    });
    let err = service()
        .compose(&payload(
            1,
            "1",
            vec![entry(wide_params(), "addr_obj", nameless, true, true)],
        ))
        .unwrap_err();
    assert!(matches!(err, ComposeError::MalformedPayload(_)));
    assert!(err.to_string().contains("no name"));
}

#[test]
fn an_unknown_level_code_is_unsupported() {
    let alien = entry(
        wide_params(),
        "addr_obj",
        addr_obj_data(60, 1, 99, "Терра", "тер"),
        true,
        true,
    );
    let err = service().compose(&payload(1, "1", vec![alien])).unwrap_err();
    assert_eq!(err, ComposeError::UnsupportedLevel);
}

#[test]
fn errors_never_leak_a_partial_record() {
    // Same chain twice: once broken at the street, once intact. The broken
    // run must fail outright and the intact run must stay unaffected.
    let service = service();
    let broken = payload(
        2,
        "1.2",
        vec![
            region_entry(),
            entry(
                json!([]),
                "addr_obj",
                addr_obj_data(20, 2, 8, "Ленина", "ул"),
                true,
                true,
            ),
        ],
    );
    assert!(matches!(
        service.compose(&broken),
        Err(ComposeError::EmptyAttributeSet { object_id: 2 })
    ));

    let intact = payload(
        2,
        "1.2",
        vec![
            region_entry(),
            entry(
                wide_params(),
                "addr_obj",
                addr_obj_data(20, 2, 8, "Ленина", "ул"),
                true,
                true,
            ),
        ],
    );
    let composed = service.compose(&intact).unwrap();
    assert_eq!(composed.short_address(), "респ. Башкортостан, ул. Ленина");
}

fn service() -> AddressService<InMemoryTypeDictionary, InMemorySynonymDictionary> {
    AddressService::new(
        InMemoryTypeDictionary::gar_defaults(),
        InMemorySynonymDictionary::new(),
    )
}

fn payload(object_id: i64, path: &str, parents: Vec<Value>) -> AddressPayload {
    AddressPayload {
        hierarchy_id: 42,
        object_id,
        path_ltree: path.to_string(),
        parents: Value::Array(parents).to_string(),
    }
}

fn region_entry() -> Value {
    entry(
        wide_params(),
        "addr_obj",
        addr_obj_data(10, 1, 1, "Башкортостан", "Респ"),
        true,
        true,
    )
}

fn city_target_entry() -> Value {
    entry(
        wide_params(),
        "addr_obj",
        addr_obj_data(20, 2, 5, "Уфа", "г"),
        true,
        true,
    )
}

fn plot_entry(relation_type: &str, level: i64) -> Value {
    let data = json!({
        "id": 25,
        "objectid": 2,
        "objectguid": TARGET_GUID,
        "level": level,
        "number": "12",
        "previd": 0,
        "nextid": 0,
        "startdate": "1900-01-01",
        "enddate": "2079-06-06"
    });
    entry(wide_params(), relation_type, data, true, true)
}

fn addr_obj_data(id: i64, objectid: i64, level: i64, name: &str, typename: &str) -> Value {
    json!({
        "id": id,
        "objectid": objectid,
        "objectguid": REGION_GUID,
        "level": level,
        "name": name,
        "typename": typename,
        "previd": 0,
        "nextid": 0,
        "startdate": "1900-01-01",
        "enddate": "2079-06-06"
    })
}

fn wide_params() -> Value {
    json!([{
        "values": [{
            "value": "450000",
            "type_id": 5,
            "start_date": "1900-01-01",
            "end_date": "2079-06-06"
        }]
    }])
}

fn entry(params: Value, relation_type: &str, data: Value, active: bool, actual: bool) -> Value {
    json!({
        "params": params,
        "relation": {
            "relation_data": data,
            "relation_type": relation_type,
            "relation_is_active": active,
            "relation_is_actual": actual
        }
    })
}
