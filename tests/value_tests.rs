use assertgen::generator::options::Options;
use assertgen::generator::record_asserts;
use assertgen::value::node::{Key, Record, Value};
use assertgen::value::observe::Observe;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Serialize)]
struct Address {
    city: String,
    zip: Option<String>,
}

#[derive(Serialize)]
struct Customer {
    id: u64,
    name: String,
    balance: f64,
    address: Address,
    tags: Vec<String>,
}

fn customer() -> Customer {
    Customer {
        id: 42,
        name: "Ada".to_string(),
        balance: 10.125,
        address: Address {
            city: "London".to_string(),
            zip: None,
        },
        tags: vec!["vip".to_string()],
    }
}

struct Invoice {
    number: String,
    issued: NaiveDate,
    lines: Vec<u32>,
}

impl Observe for Invoice {
    fn observe(&self) -> Value {
        Record::new()
            .field("number", self.number.observe())
            .field("issued", self.issued.observe())
            .field("lines", self.lines.observe())
            .into()
    }
}

#[test]
fn test_record_from_serialize_uses_member_access() {
    let record = Record::from_serialize(&customer()).unwrap();
    let lines = record_asserts(&Value::Record(record), "customer", &Options::default()).unwrap();

    assert_eq!(
        lines,
        vec![
            "assert_equal 42, customer.id",
            "assert_equal \"Ada\", customer.name",
            "assert_equal_d 10.13, customer.balance",
            "assert_equal \"London\", customer.address[:city]",
            "assert_nil customer.address[:zip]",
            "assert_equal 1, customer.tags.count",
            "assert_equal \"vip\", customer.tags[0]",
        ]
    );
}

#[test]
fn test_value_from_serialize_symbolizes_keys() {
    let value = Value::from_serialize(&customer()).unwrap();
    match value {
        Value::Mapping(map) => {
            let keys: Vec<&Key> = map.keys().collect();
            assert_eq!(keys[0], &Key::symbol("id"));
            assert_eq!(keys.len(), 5);
        }
        other => panic!("expected mapping, got {:?}", other),
    }
}

#[test]
fn test_record_from_serialize_rejects_non_structs() {
    assert!(Record::from_serialize(&vec![1, 2]).is_err());
}

#[test]
fn test_serialize_json_value() {
    let json = serde_json::json!({ "ok": true, "items": [1] });
    let value = Value::from_serialize(&json).unwrap();
    let lines = record_asserts(&value, "body", &Options::default()).unwrap();

    // serde_json orders object keys alphabetically
    assert_eq!(
        lines,
        vec![
            "assert_equal 1, body[:items].count",
            "assert_equal 1, body[:items][0]",
            "assert body[:ok]",
        ]
    );
}

#[test]
fn test_custom_observe_impl() {
    let invoice = Invoice {
        number: "INV-9".to_string(),
        issued: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        lines: vec![3, 4],
    };
    let lines = record_asserts(&invoice.observe(), "invoice", &Options::default()).unwrap();

    assert_eq!(
        lines,
        vec![
            "assert_equal \"INV-9\", invoice.number",
            "assert_equal Date.new(2023, 12, 31), invoice.issued",
            "assert_equal 2, invoice.lines.count",
            "assert_equal 3, invoice.lines[0]",
            "assert_equal 4, invoice.lines[1]",
        ]
    );
}

#[test]
fn test_index_map_observe_keeps_order() {
    let mut scores: IndexMap<&str, Option<f64>> = IndexMap::new();
    scores.insert("b", Some(1.0));
    scores.insert("a", None);

    let lines = record_asserts(&scores.observe(), "scores", &Options::default()).unwrap();
    assert_eq!(
        lines,
        vec!["assert_equal_d 1.0, scores['b']", "assert_nil scores['a']"]
    );
}

#[test]
fn test_observe_integers_of_every_width() {
    assert_eq!(u64::MAX.observe(), Value::Integer(i128::from(u64::MAX)));
    assert_eq!((-3_i8).observe(), Value::Integer(-3));
    assert_eq!(7_usize.observe(), Value::Integer(7));
}

#[derive(Serialize)]
struct Labelled {
    #[serde(rename = "two words")]
    label: String,
    count: u32,
}

#[test]
fn test_renamed_field_uses_public_send() {
    let record = Record::from_serialize(&Labelled {
        label: "x".to_string(),
        count: 3,
    })
    .unwrap();
    let lines = record_asserts(&Value::Record(record), "obj", &Options::default()).unwrap();

    assert_eq!(
        lines,
        vec![
            "assert_equal \"x\", obj.public_send(:\"two words\")",
            "assert_equal 3, obj.count",
        ]
    );
}
